//! beryl_ast: Abstract Syntax Tree definitions for the Beryl parser.
//!
//! Defines the closed `Node` variant type the parser produces and an
//! `AstVisitor` trait for consumers that walk the tree.

pub mod node;
pub mod visitor;

// Re-export key types
pub use node::{Node, Program, Receiver};
pub use visitor::AstVisitor;
