//! Valve KeyValues ("VDF") text format
//!
//! A narrow reader for the brace-delimited key/value files Steam keeps on disk
//! (`libraryfolders.vdf`, `localconfig.vdf`, app manifests). Parsing produces a small
//! tree whose nodes remember their byte spans in the source text, so edits can be
//! spliced into the original string and every untouched byte stays as Steam wrote it.
//!
//! ## Module Structure
//! - `types.rs`: Token, VdfEntry, VdfValue, VdfDocument
//! - `pure/`: lexer, parser, escaping, span edits

mod pure;
mod types;

pub use pure::{apply_edits, escape, line_indent, line_range, parse, unescape};
pub use types::{TextEdit, VdfDocument, VdfEntry, VdfError, VdfValue};
