pub mod assembler;
pub mod error;
pub mod listing;
pub mod msg;
pub mod parser;
pub mod symbol;

pub use assembler::{assemble, assemble_str, Assembler, Program};
pub use error::{Error, LineError};
pub use symbol::SymbolTable;
