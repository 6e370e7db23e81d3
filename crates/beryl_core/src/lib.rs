//! beryl_core: Core utilities for the Beryl parser.
//!
//! Provides source-position types and line maps used by the parser and the
//! diagnostics it produces.

pub mod text;

// Re-export commonly used types
pub use text::{LineAndColumn, LineMap, TextPos, TextSpan};
