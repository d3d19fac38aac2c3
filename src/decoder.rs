use serde::Serialize;
use tracing::trace;

use crate::field::{self, OPCODE};
use crate::instructions::{self, InstrClass, InstrDesc, TABLE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Op {
    // jumps
    Jmp,
    Call,
    J,
    Jg,
    // known opcodes whose operand layout is not worked out yet
    Op2,
    Op5,
    // register ALU
    Add,
    Sub,
    And,
    Or,
    Xor,
    Sll,
    Srl,
    Sra,
    Cmp,
    Mul,
    Div,
    // immediate ALU
    Addi,
    Subi,
    Andi,
    Ori,
    Xori,  // doubles as load-address (low half)
    Movhi, // load-high
    Cmpi,
    Muli,
    // memory
    Lb,
    Lw,
    Lh,
    Sb,
    Sw,
    Sh,
    Lbi,
    Lwi,
    Lhwi,
    Sbi,
    Swi,
    Shwi,
    // branches
    Beq,
    Bne,
    Blt,
    Bge,
    Ret,
    /// Table slot that exists but is not understood yet.
    Reserved,
    /// Outside the table.
    Invalid,
}

impl Op {
    pub fn is_load_address(self) -> bool {
        matches!(self, Op::Xori)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Decoded {
    /// `None` when the primary opcode fell outside the table.
    pub opcode: Option<u8>,
    pub raw: u32,
    pub rd: i16,
    pub rs: i16,
    pub rb: i16,
    pub imm: i32,
    pub class: InstrClass,
    pub desc: &'static InstrDesc,
}

impl Decoded {
    pub fn op(&self) -> Op {
        self.desc.op
    }

    pub fn mnemonic(&self) -> &'static str {
        self.desc.mnemonic
    }
}

pub trait Decoder {
    fn decode(&self, raw32: u32) -> Decoded;
}

/// Decoder for the LKV373A MicroBlaze derivative. Every word decodes; unknown
/// encodings come back as `InstrClass::Invalid` carrying the whole word in `imm`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LkvDecoder;

impl LkvDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for LkvDecoder {
    fn decode(&self, raw32: u32) -> Decoded {
        decode(raw32)
    }
}

pub fn decode(word: u32) -> Decoded {
    let primary = field::extract(word, OPCODE);
    let desc = instructions::lookup(u8::try_from(primary).unwrap_or(u8::MAX));
    let in_table = (primary as usize) < TABLE_LEN;

    let d = if !in_table || desc.class == InstrClass::Invalid {
        Decoded {
            opcode: in_table.then_some(primary as u8),
            raw: word,
            rd: 0,
            rs: 0,
            rb: 0,
            imm: word as i32,
            class: InstrClass::Invalid,
            desc,
        }
    } else {
        Decoded {
            opcode: Some(primary as u8),
            raw: word,
            rd: field::extract(word, desc.rd) as i16,
            rs: field::extract(word, desc.rs) as i16,
            rb: field::extract(word, desc.rb) as i16,
            imm: field::extract_signed(word, desc.imm),
            class: desc.class,
            desc,
        }
    };
    trace!(word, mnemonic = desc.mnemonic, "decoded");
    d
}
