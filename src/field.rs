use serde::{Deserialize, Serialize};

/// How one operand is pulled out of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSpec {
    pub mask: u32,
    pub shift: u32,
    pub sign_bit: u32,     // tested against the shifted value
    pub sign_extend: u32,  // OR'd in when sign_bit is set
}

impl ArgSpec {
    pub const EMPTY: ArgSpec = ArgSpec::unsigned(0, 0);

    pub const fn unsigned(mask: u32, shift: u32) -> Self {
        Self { mask, shift, sign_bit: 0, sign_extend: 0 }
    }

    pub const fn signed(mask: u32, shift: u32, sign_bit: u32, sign_extend: u32) -> Self {
        Self { mask, shift, sign_bit, sign_extend }
    }

    /// Field mask moved down to bit 0, i.e. the raw field width without extension bits.
    pub const fn width_mask(&self) -> u32 {
        self.mask >> self.shift
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
}

// Register class: rd 25..21, rs 20..16, rb 15..11, imm 10..0
pub const RD_R: ArgSpec = ArgSpec::unsigned(0x03E0_0000, 21);
pub const RS_R: ArgSpec = ArgSpec::unsigned(0x001F_0000, 16);
pub const RB_R: ArgSpec = ArgSpec::unsigned(0x0000_F800, 11);
pub const IMM_R: ArgSpec = ArgSpec::signed(0x0000_07FF, 0, 0x0000_0400, 0xFFFF_F800);

// Immediate class: rd 25..21, rs 20..16, imm 15..0
pub const RD_I: ArgSpec = ArgSpec::unsigned(0x03E0_0000, 21);
pub const RS_I: ArgSpec = ArgSpec::unsigned(0x001F_0000, 16);
pub const IMM_I: ArgSpec = ArgSpec::signed(0x0000_FFFF, 0, 0x0000_8000, 0xFFFF_0000);

// Jump class: imm 25..0
pub const IMM_J: ArgSpec = ArgSpec::signed(0x03FF_FFFF, 0, 0x0200_0000, 0xFC00_0000);

pub const OPCODE: ArgSpec = ArgSpec::unsigned(0xFC00_0000, 26);

#[inline]
pub fn extract(word: u32, spec: ArgSpec) -> u32 {
    (word & spec.mask) >> spec.shift
}

#[inline]
pub fn sign_extend(raw: u32, spec: ArgSpec) -> i32 {
    if raw & spec.sign_bit != 0 {
        (raw | spec.sign_extend) as i32
    } else {
        raw as i32
    }
}

#[inline]
pub fn extract_signed(word: u32, spec: ArgSpec) -> i32 {
    sign_extend(extract(word, spec), spec)
}
