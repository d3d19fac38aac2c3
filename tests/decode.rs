use lkv373a_dis::field::{self, IMM_I, IMM_J, IMM_R};
use lkv373a_dis::{decode, lookup, InstrClass, Op};

fn enc_r(op: u32, rd: u32, rs: u32, rb: u32, imm11: u32) -> u32 {
    (op << 26) | ((rd & 0x1F) << 21) | ((rs & 0x1F) << 16) | ((rb & 0x1F) << 11) | (imm11 & 0x7FF)
}

fn enc_i(op: u32, rd: u32, rs: u32, imm16: u32) -> u32 {
    (op << 26) | ((rd & 0x1F) << 21) | ((rs & 0x1F) << 16) | (imm16 & 0xFFFF)
}

#[test]
fn every_opcode_decodes_to_a_known_class() {
    for op in 0u32..64 {
        for fill in [0u32, 0x03FF_FFFF, 0x0155_5555, 0x02AA_AAAA] {
            let w = (op << 26) | fill;
            let d = decode(w);
            assert_eq!(d.raw, w);
            assert_eq!(d.opcode, Some(op as u8));
            assert!(matches!(
                d.class,
                InstrClass::Register | InstrClass::Immediate | InstrClass::Jump | InstrClass::Invalid
            ));
            assert_eq!(d.class, lookup(op as u8).class);
            assert!((0..32).contains(&d.rd) && (0..32).contains(&d.rs) && (0..32).contains(&d.rb));
        }
    }
}

#[test]
fn register_class_fields() {
    let d = decode(enc_r(0x08, 3, 1, 2, 0x7FF));
    assert_eq!(d.op(), Op::Add);
    assert_eq!(d.class, InstrClass::Register);
    assert_eq!((d.rd, d.rs, d.rb, d.imm), (3, 1, 2, -1));

    let lw = decode(0x8400_0010);
    assert_eq!(lw.mnemonic(), "lw");
    assert_eq!((lw.rd, lw.rs, lw.rb, lw.imm), (0, 0, 0, 0x10));
}

#[test]
fn immediate_class_has_no_base() {
    let d = decode(enc_i(0x10, 31, 7, 0xFFF0) | (0x1F << 11));
    assert_eq!(d.mnemonic(), "addi");
    assert_eq!(d.class, InstrClass::Immediate);
    assert_eq!(d.rd, 31);
    assert_eq!(d.rs, 7);
    assert_eq!(d.rb, 0);
    // bits 15..11 are inside imm16 here, not a base register
    assert_eq!(d.imm, -0x10);
}

#[test]
fn jump_class_sign_extends_26_bits() {
    let d = decode(0x0000_0001);
    assert_eq!(d.mnemonic(), "jmp");
    assert_eq!(d.class, InstrClass::Jump);
    assert_eq!((d.rd, d.rs, d.rb, d.imm), (0, 0, 0, 1));

    let back = decode((0x01 << 26) | 0x03FF_FFFE);
    assert_eq!(back.op(), Op::Call);
    assert_eq!(back.imm, -2);
}

#[test]
fn sign_extension_equals_raw_minus_two_pow_n() {
    for (spec, n) in [(IMM_R, 11), (IMM_I, 16), (IMM_J, 26)] {
        let raw = 1u32 << (n - 1);
        assert_eq!(i64::from(field::sign_extend(raw, spec)), i64::from(raw) - (1i64 << n));
    }
}

#[test]
fn unknown_opcodes_keep_the_whole_word() {
    let d = decode(0xFC12_3456);
    assert_eq!(d.class, InstrClass::Invalid);
    assert_eq!(d.mnemonic(), "unk3F");
    assert_eq!(d.imm as u32, 0xFC12_3456);
    assert_eq!((d.rd, d.rs, d.rb), (0, 0, 0));
}

#[test]
fn lookup_past_table_is_dword_sentinel() {
    for o in [64u8, 100, 255] {
        let d = lookup(o);
        assert_eq!(d.mnemonic, ".dword");
        assert_eq!(d.class, InstrClass::Invalid);
    }
}
