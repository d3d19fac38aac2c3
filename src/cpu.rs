use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decoder::{Decoded, Op};

pub const NUM_REGS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisasmConfig {
    pub big_endian: bool,      // the LKV373A core fetches big-endian words
    pub track_registers: bool, // feed the shadow so load-address targets resolve
}

impl Default for DisasmConfig {
    fn default() -> Self {
        Self {
            big_endian: true,
            track_registers: true,
        }
    }
}

impl DisasmConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Approximate register contents, good enough to annotate `movhi`/`xori` address
/// pairs. Nothing else is modelled: no flags, no memory, no control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuShadow {
    regs: [u32; NUM_REGS],
}

impl Default for CpuShadow {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuShadow {
    pub fn new() -> Self {
        Self { regs: [0; NUM_REGS] }
    }

    /// r0 always reads as zero.
    pub fn reg(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    pub fn set_reg(&mut self, idx: usize, val: u32) {
        if let Some(r) = self.regs.get_mut(idx) {
            *r = val;
        }
        self.regs[0] = 0;
    }

    pub fn regs(&self) -> &[u32; NUM_REGS] {
        &self.regs
    }

    pub fn update(&mut self, d: &Decoded) {
        let rd = d.rd as usize;
        let rs = self.reg(d.rs as usize);
        match d.op() {
            Op::Movhi => {
                let v = rs.wrapping_add(d.imm as u32) << 16;
                debug!(rd, value = v, "movhi shadow write");
                self.set_reg(rd, v);
            }
            Op::Xori => {
                // operate on the raw field, the sign-extended upper half is dropped
                let v = rs ^ (d.imm as u32 & d.desc.imm.width_mask());
                debug!(rd, value = v, "xori shadow write");
                self.set_reg(rd, v);
            }
            _ => {}
        }
        self.regs[0] = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    fn enc_i(op: u32, rd: u32, rs: u32, imm16: u32) -> u32 {
        (op << 26) | ((rd & 0x1F) << 21) | ((rs & 0x1F) << 16) | (imm16 & 0xFFFF)
    }

    #[test]
    fn movhi_then_xori_builds_address() {
        let mut cpu = CpuShadow::new();
        cpu.update(&decode(enc_i(0x15, 3, 0, 0x8001)));
        // imm sign-extends to 0xffff8001; the upper half falls off the shift
        assert_eq!(cpu.reg(3), 0x8001_0000);
        cpu.update(&decode(enc_i(0x14, 3, 3, 0xABCD)));
        assert_eq!(cpu.reg(3), 0x8001_ABCD);
    }

    #[test]
    fn writes_to_r0_are_discarded() {
        let mut cpu = CpuShadow::new();
        cpu.update(&decode(enc_i(0x15, 0, 0, 0x1234)));
        assert_eq!(cpu.regs()[0], 0);
        cpu.set_reg(0, 7);
        assert_eq!(cpu.reg(0), 0);
    }

    #[test]
    fn config_json_defaults_missing_fields() {
        let cfg = DisasmConfig::from_json(r#"{ "track_registers": false }"#).unwrap();
        assert!(cfg.big_endian);
        assert!(!cfg.track_registers);
    }
}
