use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Memory side of the host: raw byte reads plus an error hook.
pub trait Bus {
    fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<()>;

    /// Called before a failed read is returned to the caller.
    fn memory_error(&mut self, _err: &anyhow::Error, _addr: u64) {}
}

/// Assemble an instruction word from fetched bytes.
pub fn word_from_bytes(bytes: [u8; 4], big_endian: bool) -> u32 {
    if big_endian {
        u32::from_be_bytes(bytes)
    } else {
        u32::from_le_bytes(bytes)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LinearMemory {
    pub mem: Vec<u8>,
    pub base: u64,
}

impl LinearMemory {
    pub fn new(size: usize) -> Self {
        Self {
            mem: vec![0; size],
            base: 0,
        }
    }

    pub fn from_bytes(base: u64, bytes: Vec<u8>) -> Self {
        Self { mem: bytes, base }
    }

    fn offset(&self, addr: u64, len: usize) -> Result<usize> {
        ensure!(addr >= self.base, "address {addr:#x} below base {:#x}", self.base);
        let off = usize::try_from(addr - self.base)?;
        ensure!(
            off.checked_add(len).is_some_and(|end| end <= self.mem.len()),
            "read of {len} bytes at {addr:#x} past end of memory"
        );
        Ok(off)
    }

    pub fn write_u32_be(&mut self, addr: u64, val: u32) -> Result<()> {
        let off = self.offset(addr, 4)?;
        self.mem[off..off + 4].copy_from_slice(&val.to_be_bytes());
        Ok(())
    }
}

impl Bus for LinearMemory {
    fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<()> {
        let off = self.offset(addr, buf.len())?;
        buf.copy_from_slice(&self.mem[off..off + buf.len()]);
        Ok(())
    }
}
