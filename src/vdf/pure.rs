//! Pure functions for VDF text
//!
//! These functions have no side effects and are deterministic.

mod edit;
mod escape;
mod lexer;
mod parser;

pub use edit::{apply_edits, line_indent, line_range};
pub use escape::{escape, unescape};
pub use parser::parse;
