//! Two-pass assembler for the MOS 6502.
//!
//! Source text goes in as lines; out comes a flat code image, the symbol
//! table, the relocations an external linker has to apply, and the
//! diagnostics of pass one and the final pass.

pub mod addrmode;
pub mod assembler;
mod directive;
pub mod dump;
mod encode;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod msg;
pub mod objmap;
pub mod reloc;
pub mod segment;
pub mod source;
pub mod symbols;
pub mod token;

pub use assembler::{assemble, assemble_str, Assembler, Assembly, MAX_PASSES};
pub use error::{AsmError, Error};
pub use expr::ExprValue;
pub use msg::{Level, Msg};
pub use reloc::{Reloc, Relocations};
pub use symbols::{Symbol, SymbolTable};
