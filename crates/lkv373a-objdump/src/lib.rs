pub mod model;

pub use model::{load_labels, load_raw_bin, read_u8, Image, Segment};

use std::fmt::Write as _;

use lkv373a_dis::{Disassembler, DisasmError, Line, Symbols, INSN_WIDTH};

#[derive(Debug, Clone, Copy, Default)]
pub struct RangeOpts {
    pub show_bytes: bool,
    pub data: bool, // dump words as .dword instead of decoding
}

fn push_line(buf: &mut String, line: &Line, show_bytes: bool, big_endian: bool) {
    let pc = line.addr;
    if show_bytes {
        let bytes = if big_endian { line.raw.to_be_bytes() } else { line.raw.to_le_bytes() };
        let _ = write!(buf, "{pc:#010x}: ");
        for b in bytes {
            let _ = write!(buf, "{b:02x} ");
        }
        let _ = writeln!(buf, "  {}", line.text);
    } else {
        let _ = writeln!(buf, "{pc:#010x}: {}", line.text);
    }
}

/// Disassemble `[start, end)` word by word. Stops at the first unreadable word.
pub fn render_range<S: Symbols + ?Sized>(
    img: &mut Image,
    dis: &mut Disassembler,
    syms: &S,
    start: u64,
    end: u64,
    opts: RangeOpts,
) -> String {
    let mut buf = String::new();
    let mut pc = start;
    while pc < end {
        let res = if opts.data { dis.print_data(pc, img) } else { dis.print_text(pc, img, syms) };
        match res {
            Ok(line) => {
                if let Some(name) = syms.symbol_name_at(pc) {
                    let _ = writeln!(buf, "<{name}>:");
                }
                push_line(&mut buf, &line, opts.show_bytes, dis.config().big_endian);
            }
            Err(DisasmError::Memory { .. }) => {
                let _ = writeln!(buf, "{pc:#010x}: <oob>");
                break;
            }
        }
        pc = pc.wrapping_add(INSN_WIDTH as u64);
    }
    buf
}
