use serde::Serialize;
use tracing::warn;

use crate::cpu::{CpuShadow, DisasmConfig};
use crate::decoder::{Decoder, LkvDecoder};
use crate::disasm::{fmt_data, fmt_decoded, Symbols};
use crate::instructions::UNKNOWN;
use crate::memory::{word_from_bytes, Bus};

/// Every LKV373A instruction is one 32-bit word.
pub const INSN_WIDTH: usize = 4;

#[derive(thiserror::Error, Debug)]
pub enum DisasmError {
    #[error("Memory read failed at {addr:#010x}: {source}")]
    Memory {
        addr: u64,
        #[source]
        source: anyhow::Error,
    },
}

/// One rendered line of output.
#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub addr: u64,
    pub raw: u32,
    pub len: usize,
    pub text: String,
}

/// State for one pass over one instruction stream. The register shadow lives
/// here, so concurrent passes need separate sessions.
#[derive(Debug, Default)]
pub struct Disassembler<D: Decoder = LkvDecoder> {
    cfg: DisasmConfig,
    dec: D,
    cpu: Option<CpuShadow>,
}

impl Disassembler<LkvDecoder> {
    pub fn new(cfg: DisasmConfig) -> Self {
        Self::with_decoder(cfg, LkvDecoder::new())
    }
}

impl<D: Decoder> Disassembler<D> {
    pub fn with_decoder(cfg: DisasmConfig, dec: D) -> Self {
        Self { cfg, dec, cpu: None }
    }

    pub fn config(&self) -> &DisasmConfig {
        &self.cfg
    }

    /// Register shadow, if anything has been decoded yet.
    pub fn cpu(&self) -> Option<&CpuShadow> {
        self.cpu.as_ref()
    }

    fn fetch<B: Bus>(&self, addr: u64, bus: &mut B) -> Result<u32, DisasmError> {
        let mut buf = [0u8; INSN_WIDTH];
        if let Err(source) = bus.read_memory(addr, &mut buf) {
            warn!(addr, error = %source, "memory read failed");
            bus.memory_error(&source, addr);
            return Err(DisasmError::Memory { addr, source });
        }
        Ok(word_from_bytes(buf, self.cfg.big_endian))
    }

    /// Decode the word at `addr`, feed the register shadow and render it.
    pub fn print_text<B: Bus, S: Symbols + ?Sized>(
        &mut self,
        addr: u64,
        bus: &mut B,
        syms: &S,
    ) -> Result<Line, DisasmError> {
        let raw = self.fetch(addr, bus)?;
        let d = self.dec.decode(raw);
        let cpu = self.cpu.get_or_insert_with(CpuShadow::new);
        if self.cfg.track_registers {
            cpu.update(&d);
        }
        let text = fmt_decoded(&d, addr, cpu, syms);
        Ok(Line { addr, raw, len: INSN_WIDTH, text })
    }

    /// Render the word at `addr` as data without decoding it.
    pub fn print_data<B: Bus>(&mut self, addr: u64, bus: &mut B) -> Result<Line, DisasmError> {
        let raw = self.fetch(addr, bus)?;
        Ok(Line { addr, raw, len: INSN_WIDTH, text: fmt_data(UNKNOWN.mnemonic, raw) })
    }

    /// Forget tracked register values, e.g. when jumping to an unrelated region.
    pub fn reset(&mut self) {
        self.cpu = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disasm::NoSymbols;
    use crate::memory::LinearMemory;

    #[test]
    fn failed_read_reaches_host_hook() {
        struct Failing {
            reported: Vec<u64>,
        }
        impl Bus for Failing {
            fn read_memory(&mut self, addr: u64, _buf: &mut [u8]) -> anyhow::Result<()> {
                anyhow::bail!("unmapped {addr:#x}")
            }
            fn memory_error(&mut self, _err: &anyhow::Error, addr: u64) {
                self.reported.push(addr);
            }
        }
        let mut host = Failing { reported: Vec::new() };
        let mut dis = Disassembler::new(DisasmConfig::default());
        let err = dis.print_text(0x20, &mut host, &NoSymbols).unwrap_err();
        assert!(matches!(err, DisasmError::Memory { addr: 0x20, .. }));
        assert_eq!(host.reported, vec![0x20]);
        assert!(dis.cpu().is_none());
    }

    #[test]
    fn shadow_created_on_first_decode() {
        let mut mem = LinearMemory::new(4);
        let mut dis = Disassembler::new(DisasmConfig::default());
        assert!(dis.cpu().is_none());
        let line = dis.print_text(0, &mut mem, &NoSymbols).unwrap();
        assert_eq!(line.len, INSN_WIDTH);
        assert!(dis.cpu().is_some());
        dis.reset();
        assert!(dis.cpu().is_none());
    }
}
