pub mod clauses;
pub mod parser;

pub use clauses::{split_clauses, Clause};
pub use parser::{DocumentError, DocumentParser, FileKind, ParsedDocument};
