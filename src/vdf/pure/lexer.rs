//! VDF tokenizer

use super::super::types::{Token, TokenKind, VdfError};
use super::escape::unescape;

/// Split VDF text into strings and braces, dropping whitespace, `//` comments and
/// `[$PLATFORM]` conditionals.
pub fn tokenize(src: &str) -> Result<Vec<Token>, VdfError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }

        match b {
            b'{' => {
                tokens.push(Token {
                    kind: TokenKind::Open,
                    span: i..i + 1,
                });
                i += 1;
            }
            b'}' => {
                tokens.push(Token {
                    kind: TokenKind::Close,
                    span: i..i + 1,
                });
                i += 1;
            }
            b'"' => {
                let start = i;
                i += 1;
                let content_start = i;
                loop {
                    match bytes.get(i) {
                        None => return Err(VdfError::UnterminatedString(start)),
                        Some(b'\\') => i += 2,
                        Some(b'"') => break,
                        Some(_) => i += 1,
                    }
                }
                // `i` sits on the closing quote; escapes never split a UTF-8 sequence
                let raw = &src[content_start..i];
                i += 1;
                tokens.push(Token {
                    kind: TokenKind::Str(unescape(raw)),
                    span: start..i,
                });
            }
            _ => {
                let start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'{' | b'}' | b'"')
                {
                    i += 1;
                }
                let word = &src[start..i];
                if word.starts_with('[') && word.ends_with(']') {
                    continue;
                }
                tokens.push(Token {
                    kind: TokenKind::Str(word.to_string()),
                    span: start..i,
                });
            }
        }
    }

    Ok(tokens)
}
