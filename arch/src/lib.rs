//! MOS 6502 instruction set: mnemonics, registers, addressing modes and the
//! opcode table shared by the assembler.

pub mod mnemonic;
pub mod mode;
pub mod opcode;
pub mod reg;

pub use mnemonic::Mnemonic;
pub use mode::AddrMode;
pub use opcode::{decode, opcode};
pub use reg::Reg;
