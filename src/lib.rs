pub mod cpu;
pub mod decoder;
pub mod disasm;
pub mod field;
pub mod instructions;
pub mod memory;
pub mod session;

pub use cpu::{CpuShadow, DisasmConfig};
pub use decoder::{decode, Decoded, Decoder, LkvDecoder, Op};
pub use disasm::{fmt_decoded, Label, NoSymbols, SymbolMap, Symbols};
pub use instructions::{lookup, InstrClass, InstrDesc};
pub use memory::{Bus, LinearMemory};
pub use session::{Disassembler, DisasmError, Line, INSN_WIDTH};
