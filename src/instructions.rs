use crate::decoder::Op;
use crate::field::{ArgSpec, IMM_I, IMM_J, IMM_R, RB_R, RD_I, RD_R, RS_I, RS_R};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstrClass {
    Register,
    Immediate,
    Jump,
    Invalid,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InstrDesc {
    pub opcode: u8,
    pub op: Op,
    pub mnemonic: &'static str,
    pub class: InstrClass,
    pub rd: ArgSpec,
    pub rs: ArgSpec,
    pub rb: ArgSpec,
    pub imm: ArgSpec,
}

impl InstrDesc {
    const fn reg(opcode: u8, op: Op, mnemonic: &'static str) -> Self {
        Self { opcode, op, mnemonic, class: InstrClass::Register, rd: RD_R, rs: RS_R, rb: RB_R, imm: IMM_R }
    }

    const fn imm(opcode: u8, op: Op, mnemonic: &'static str) -> Self {
        Self { opcode, op, mnemonic, class: InstrClass::Immediate, rd: RD_I, rs: RS_I, rb: ArgSpec::EMPTY, imm: IMM_I }
    }

    const fn jump(opcode: u8, op: Op, mnemonic: &'static str) -> Self {
        Self {
            opcode,
            op,
            mnemonic,
            class: InstrClass::Jump,
            rd: ArgSpec::EMPTY,
            rs: ArgSpec::EMPTY,
            rb: ArgSpec::EMPTY,
            imm: IMM_J,
        }
    }

    /// Identified opcode with an unknown layout: printed as a raw word under its own name.
    const fn opaque(opcode: u8, op: Op, mnemonic: &'static str) -> Self {
        Self {
            opcode,
            op,
            mnemonic,
            class: InstrClass::Invalid,
            rd: ArgSpec::EMPTY,
            rs: ArgSpec::EMPTY,
            rb: ArgSpec::EMPTY,
            imm: ArgSpec::EMPTY,
        }
    }

    /// Reserved slot: keeps a printable name but decodes no operands.
    const fn reserved(opcode: u8, mnemonic: &'static str) -> Self {
        Self::opaque(opcode, Op::Reserved, mnemonic)
    }
}

pub const TABLE_LEN: usize = 64;

/// Returned for anything that does not index into `TABLE`.
pub static UNKNOWN: InstrDesc = InstrDesc {
    opcode: 0xFF,
    op: Op::Invalid,
    mnemonic: ".dword",
    class: InstrClass::Invalid,
    rd: ArgSpec::EMPTY,
    rs: ArgSpec::EMPTY,
    rb: ArgSpec::EMPTY,
    imm: ArgSpec::EMPTY,
};

// Slot index == primary opcode. Large parts of the opcode space are still unidentified.
pub static TABLE: [InstrDesc; TABLE_LEN] = [
    InstrDesc::jump(0x00, Op::Jmp, "jmp"),
    InstrDesc::jump(0x01, Op::Call, "call"),
    InstrDesc::opaque(0x02, Op::Op2, "op_2"),
    InstrDesc::jump(0x03, Op::J, "j_"),
    InstrDesc::jump(0x04, Op::Jg, "jg"),
    InstrDesc::opaque(0x05, Op::Op5, "op_5"),
    InstrDesc::reserved(0x06, "unk06"),
    InstrDesc::reserved(0x07, "unk07"),
    InstrDesc::reg(0x08, Op::Add, "add"),
    InstrDesc::reg(0x09, Op::Sub, "sub"),
    InstrDesc::reg(0x0A, Op::And, "and"),
    InstrDesc::reg(0x0B, Op::Or, "or"),
    InstrDesc::reg(0x0C, Op::Xor, "xor"),
    InstrDesc::reg(0x0D, Op::Sll, "sll"),
    InstrDesc::reg(0x0E, Op::Srl, "srl"),
    InstrDesc::reg(0x0F, Op::Sra, "sra"),
    InstrDesc::imm(0x10, Op::Addi, "addi"),
    InstrDesc::imm(0x11, Op::Subi, "subi"),
    InstrDesc::imm(0x12, Op::Andi, "andi"),
    InstrDesc::imm(0x13, Op::Ori, "ori"),
    InstrDesc::imm(0x14, Op::Xori, "xori"),
    InstrDesc::imm(0x15, Op::Movhi, "movhi"),
    InstrDesc::reserved(0x16, "unk16"),
    InstrDesc::reserved(0x17, "unk17"),
    InstrDesc::reg(0x18, Op::Cmp, "cmp"),
    InstrDesc::imm(0x19, Op::Cmpi, "cmpi"),
    InstrDesc::reserved(0x1A, "unk1A"),
    InstrDesc::reserved(0x1B, "unk1B"),
    InstrDesc::reserved(0x1C, "unk1C"),
    InstrDesc::reserved(0x1D, "unk1D"),
    InstrDesc::reserved(0x1E, "unk1E"),
    InstrDesc::reserved(0x1F, "unk1F"),
    InstrDesc::reg(0x20, Op::Lb, "lb"),
    InstrDesc::reg(0x21, Op::Lw, "lw"),
    InstrDesc::reg(0x22, Op::Lh, "lh"),
    InstrDesc::reserved(0x23, "unk23"),
    InstrDesc::reg(0x24, Op::Sb, "sb"),
    InstrDesc::reg(0x25, Op::Sw, "sw"),
    InstrDesc::reg(0x26, Op::Sh, "sh"),
    InstrDesc::reserved(0x27, "unk27"),
    InstrDesc::imm(0x28, Op::Lbi, "lbi"),
    InstrDesc::imm(0x29, Op::Lwi, "lwi"),
    InstrDesc::imm(0x2A, Op::Lhwi, "lhwi"),
    InstrDesc::reserved(0x2B, "unk2B"),
    InstrDesc::imm(0x2C, Op::Sbi, "sbi"),
    InstrDesc::imm(0x2D, Op::Swi, "swi"),
    InstrDesc::imm(0x2E, Op::Shwi, "shwi"),
    InstrDesc::reserved(0x2F, "unk2F"),
    InstrDesc::reg(0x30, Op::Mul, "mul"),
    InstrDesc::reg(0x31, Op::Div, "div"),
    InstrDesc::imm(0x32, Op::Muli, "muli"),
    InstrDesc::reserved(0x33, "unk33"),
    InstrDesc::reserved(0x34, "unk34"),
    InstrDesc::reserved(0x35, "unk35"),
    InstrDesc::reserved(0x36, "unk36"),
    InstrDesc::reserved(0x37, "unk37"),
    InstrDesc::imm(0x38, Op::Beq, "beq"),
    InstrDesc::imm(0x39, Op::Bne, "bne"),
    InstrDesc::imm(0x3A, Op::Blt, "blt"),
    InstrDesc::imm(0x3B, Op::Bge, "bge"),
    InstrDesc::reg(0x3C, Op::Ret, "ret"),
    InstrDesc::reserved(0x3D, "unk3D"),
    InstrDesc::reserved(0x3E, "unk3E"),
    InstrDesc::reserved(0x3F, "unk3F"),
];

pub fn lookup(opcode: u8) -> &'static InstrDesc {
    TABLE.get(opcode as usize).unwrap_or(&UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_index_matches_opcode() {
        for (i, d) in TABLE.iter().enumerate() {
            assert_eq!(d.opcode as usize, i, "{}", d.mnemonic);
            assert!(d.mnemonic.len() <= 6, "{}", d.mnemonic);
        }
    }

    #[test]
    fn out_of_range_is_sentinel() {
        for o in 64u8..=255 {
            let d = lookup(o);
            assert_eq!(d.mnemonic, ".dword");
            assert_eq!(d.class, InstrClass::Invalid);
            assert!(matches!(d.op, Op::Invalid));
        }
    }

    #[test]
    fn invalid_slots_carry_no_operands() {
        for d in TABLE.iter().filter(|d| d.class == InstrClass::Invalid) {
            assert!(d.rd.is_empty() && d.rs.is_empty() && d.rb.is_empty() && d.imm.is_empty());
            match d.op {
                Op::Reserved => assert!(d.mnemonic.starts_with("unk"), "{}", d.mnemonic),
                Op::Op2 | Op::Op5 => assert!(d.mnemonic.starts_with("op_"), "{}", d.mnemonic),
                other => panic!("{other:?} in an invalid slot"),
            }
        }
    }

    #[test]
    fn low_opcodes_keep_their_known_names() {
        let names: Vec<&str> = TABLE[..6].iter().map(|d| d.mnemonic).collect();
        assert_eq!(names, ["jmp", "call", "op_2", "j_", "jg", "op_5"]);
        assert_eq!(lookup(0x03).class, InstrClass::Jump);
        assert_eq!(lookup(0x02).op, Op::Op2);
        assert_eq!(lookup(0x05).op, Op::Op5);
    }
}
