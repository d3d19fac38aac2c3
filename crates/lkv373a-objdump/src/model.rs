use anyhow::{anyhow, Result};
use std::path::Path;

use lkv373a_dis::{Bus, Label, SymbolMap};

#[derive(Debug, Clone)]
pub struct Segment {
    pub name: String,
    pub base: u64,
    pub bytes: Vec<u8>,
    pub perms: &'static str, // e.g., "r-x"
    pub kind: &'static str,  // e.g., "raw"
}

impl Segment {
    pub fn end(&self) -> u64 {
        self.base.wrapping_add(self.bytes.len() as u64)
    }

    fn contains(&self, addr: u64) -> bool {
        addr >= self.base && addr - self.base < self.bytes.len() as u64
    }
}

#[derive(Debug, Clone)]
pub struct Image {
    pub segments: Vec<Segment>,
}

pub fn load_raw_bin(path: &Path, base: u64, skip: usize, len: Option<usize>) -> Result<Image> {
    let file = std::fs::read(path)?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    anyhow::ensure!(
        base.checked_add(payload.len() as u64).is_some(),
        "--base {base:#x} leaves no room for {} bytes",
        payload.len()
    );
    let seg = Segment { name: "segment0".into(), base, bytes: payload.to_vec(), perms: "r-x", kind: "raw" };
    Ok(Image { segments: vec![seg] })
}

pub fn load_labels(path: &Path) -> Result<SymbolMap> {
    let txt = std::fs::read_to_string(path)?;
    let labels: Vec<Label> = serde_json::from_str(&txt)?;
    Ok(labels.into_iter().collect())
}

pub fn read_u8(img: &Image, addr: u64) -> Option<u8> {
    img.segments
        .iter()
        .find(|s| s.contains(addr))
        .map(|s| s.bytes[(addr - s.base) as usize])
}

impl Bus for Image {
    fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<()> {
        for (i, b) in buf.iter_mut().enumerate() {
            let a = addr.wrapping_add(i as u64);
            *b = read_u8(self, a).ok_or_else(|| anyhow!("address {a:#010x} is not mapped"))?;
        }
        Ok(())
    }
}
