//! VDF type definitions

use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VdfError {
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),

    #[error("unexpected '}}' at byte {0}")]
    UnexpectedClose(usize),

    #[error("key at byte {0} has no value")]
    MissingValue(usize),

    #[error("block opened at byte {0} is never closed")]
    UnclosedBlock(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Quoted or bare string, already unescaped
    Str(String),
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range in the source, including quotes for quoted strings
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VdfValue {
    Str {
        value: String,
        span: Range<usize>,
    },
    Block {
        /// Offset of the `{`
        open: usize,
        /// Offset of the matching `}`
        close: usize,
        entries: Vec<VdfEntry>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VdfEntry {
    pub key: String,
    pub key_span: Range<usize>,
    pub value: VdfValue,
}

impl VdfEntry {
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            VdfValue::Str { value, .. } => Some(value),
            VdfValue::Block { .. } => None,
        }
    }

    pub fn entries(&self) -> &[VdfEntry] {
        match &self.value {
            VdfValue::Block { entries, .. } => entries.as_slice(),
            VdfValue::Str { .. } => &[],
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.value, VdfValue::Block { .. })
    }

    /// Direct child by key (VDF keys are case-insensitive)
    pub fn child(&self, key: &str) -> Option<&VdfEntry> {
        self.entries()
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(key))
    }

    /// Byte range of the whole entry, from the key's opening quote to the end of its value
    pub fn full_span(&self) -> Range<usize> {
        let end = match &self.value {
            VdfValue::Str { span, .. } => span.end,
            VdfValue::Block { close, .. } => close + 1,
        };
        self.key_span.start..end
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VdfDocument {
    pub entries: Vec<VdfEntry>,
}

impl VdfDocument {
    /// Follow a chain of block keys from the top level
    pub fn find_path(&self, path: &[&str]) -> Option<&VdfEntry> {
        let (first, rest) = path.split_first()?;
        let mut current = self
            .entries
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(first))?;
        for key in rest {
            current = current.child(key)?;
        }
        Some(current)
    }

    /// First block with `key`, depth-first in document order
    pub fn find_first_block(&self, key: &str) -> Option<&VdfEntry> {
        fn walk<'a>(entries: &'a [VdfEntry], key: &str) -> Option<&'a VdfEntry> {
            for entry in entries {
                if entry.is_block() && entry.key.eq_ignore_ascii_case(key) {
                    return Some(entry);
                }
                if let Some(found) = walk(entry.entries(), key) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.entries, key)
    }

    /// Every string value stored under `key`, at any depth, in document order
    pub fn string_values(&self, key: &str) -> Vec<&str> {
        fn walk<'a>(entries: &'a [VdfEntry], key: &str, out: &mut Vec<&'a str>) {
            for entry in entries {
                match &entry.value {
                    VdfValue::Str { value, .. } if entry.key.eq_ignore_ascii_case(key) => {
                        out.push(value);
                    }
                    VdfValue::Block { entries, .. } => walk(entries, key, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.entries, key, &mut out);
        out
    }
}

/// Replace `range` of the source with `replacement`
#[derive(Debug, Clone, PartialEq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl TextEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            replacement: text.into(),
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            replacement: text.into(),
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self {
            range,
            replacement: String::new(),
        }
    }
}
