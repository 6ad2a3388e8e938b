pub mod assembler;
pub mod config;
pub mod encode;
pub mod error;
pub mod image;
pub mod isa;
pub mod lexer;
pub mod listing;
pub mod number;
pub mod operand;

pub use assembler::{assemble, Assembler, Assembly, SymbolTable};
pub use config::{AsmConfig, HexStyle, RawWordPolicy};
pub use encode::Instruction;
pub use error::AsmError;
pub use image::MemoryImage;
