//! Span-based text splicing

use std::ops::Range;

use super::super::types::TextEdit;

/// Apply non-overlapping edits to `src`. Bytes outside the edited ranges are untouched.
pub fn apply_edits(src: &str, mut edits: Vec<TextEdit>) -> String {
    // Back to front so earlier offsets stay valid
    edits.sort_by(|a, b| b.range.start.cmp(&a.range.start));

    let mut out = src.to_string();
    for edit in edits {
        out.replace_range(edit.range, &edit.replacement);
    }
    out
}

/// Leading whitespace of the line containing `offset`
pub fn line_indent(src: &str, offset: usize) -> &str {
    let line_start = src[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = &src[line_start..];
    let indent_len = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..indent_len]
}

/// Range of the whole line containing `offset`, including its trailing newline if any
pub fn line_range(src: &str, offset: usize) -> Range<usize> {
    let start = src[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = src[offset..]
        .find('\n')
        .map(|i| offset + i + 1)
        .unwrap_or(src.len());
    start..end
}
