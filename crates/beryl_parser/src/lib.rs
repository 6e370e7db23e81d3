//! beryl_parser: The Beryl language parser.
//!
//! Beryl is a tiny dynamically-typed language in which everything is a
//! message send. This crate turns source text into an arena-allocated
//! [`Program`] in a single pass: a backtracking recursive descent engine
//! reads characters directly, with no tokenizer in between.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let program = beryl_parser::parse(&arena, "x = 1\nx.+ 2\n").unwrap();
//! assert_eq!(program.len(), 2);
//! ```

mod cursor;
mod operators;
mod parser;

pub use beryl_ast::{Node, Program, Receiver};
pub use beryl_diagnostics::ParseError;
pub use parser::Parser;

use bumpalo::Bump;

/// Parse Beryl source text into a program, allocating all nodes into the
/// given arena. Returns the first hard error if the input is malformed.
pub fn parse<'a>(arena: &'a Bump, source: &str) -> Result<Program<'a>, ParseError> {
    Parser::new(arena, source).parse_program()
}
