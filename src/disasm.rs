use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cpu::CpuShadow;
use crate::decoder::Decoded;
use crate::instructions::InstrClass;

/// Symbol lookup supplied by the host.
pub trait Symbols {
    fn symbol_exists_at(&self, addr: u64) -> bool;
    fn print_symbol_at(&self, addr: u64) -> String;

    /// Bare name, used for listing headers.
    fn symbol_name_at(&self, _addr: u64) -> Option<String> {
        None
    }
}

/// Host without a symbol table.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSymbols;

impl Symbols for NoSymbols {
    fn symbol_exists_at(&self, _addr: u64) -> bool {
        false
    }
    fn print_symbol_at(&self, addr: u64) -> String {
        format!("{addr:#x}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub addr: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolMap {
    names: BTreeMap<u64, String>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, addr: u64, name: impl Into<String>) {
        self.names.insert(addr, name.into());
    }

    pub fn get(&self, addr: u64) -> Option<&str> {
        self.names.get(&addr).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<Label> for SymbolMap {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        let mut m = SymbolMap::new();
        for l in iter {
            m.insert(l.addr, l.name);
        }
        m
    }
}

impl Symbols for SymbolMap {
    fn symbol_exists_at(&self, addr: u64) -> bool {
        self.names.contains_key(&addr)
    }
    fn print_symbol_at(&self, addr: u64) -> String {
        match self.names.get(&addr) {
            Some(name) => format!("{addr:#x} <{name}>"),
            None => format!("{addr:#x}"),
        }
    }
    fn symbol_name_at(&self, addr: u64) -> Option<String> {
        self.get(addr).map(str::to_owned)
    }
}

/// `-0x10` / `0x10`
fn signed_hex(v: i32) -> String {
    if v < 0 {
        format!("-0x{:x}", v.unsigned_abs())
    } else {
        format!("0x{v:x}")
    }
}

fn annotate<S: Symbols + ?Sized>(syms: &S, addr: u64) -> String {
    if syms.symbol_exists_at(addr) {
        format!("\t// {}", syms.print_symbol_at(addr))
    } else {
        format!("\t// {addr:#x}")
    }
}

/// Render one decoded word at `addr`. `cpu` must already reflect this instruction.
pub fn fmt_decoded<S: Symbols + ?Sized>(d: &Decoded, addr: u64, cpu: &CpuShadow, syms: &S) -> String {
    let mn = d.mnemonic();
    match d.class {
        InstrClass::Register => {
            format!("{mn} ${}, ${}, ${}, {}", d.rd, d.rs, d.rb, signed_hex(d.imm))
        }
        InstrClass::Immediate => {
            let mut s = format!("{mn} ${}, ${}, {}", d.rd, d.rs, signed_hex(d.imm));
            if d.op().is_load_address() {
                let ea = cpu.reg(d.rd as usize) as u64;
                s.push_str(&annotate(syms, ea));
            }
            s
        }
        InstrClass::Jump => {
            let target = addr.wrapping_add((i64::from(d.imm) * 4) as u64);
            format!("{mn} $pc+({:x}*4){}", d.imm, annotate(syms, target))
        }
        InstrClass::Invalid => fmt_data(mn, d.raw),
    }
}

pub fn fmt_data(mn: &str, raw: u32) -> String {
    format!("{mn} 0x{raw:04X}")
}
