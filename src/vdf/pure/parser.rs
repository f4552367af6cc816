//! VDF tree builder

use super::super::types::{Token, TokenKind, VdfDocument, VdfEntry, VdfError, VdfValue};
use super::lexer::tokenize;

/// Parse VDF text into a span-annotated tree
pub fn parse(src: &str) -> Result<VdfDocument, VdfError> {
    let tokens = tokenize(src)?;
    let mut pos = 0;
    let entries = parse_entries(&tokens, &mut pos, None)?;
    Ok(VdfDocument { entries })
}

/// Read entries until the matching close brace (or end of input at top level).
/// `opened_at` is the offset of the `{` that started this block.
fn parse_entries(
    tokens: &[Token],
    pos: &mut usize,
    opened_at: Option<usize>,
) -> Result<Vec<VdfEntry>, VdfError> {
    let mut entries = Vec::new();

    loop {
        let Some(token) = tokens.get(*pos) else {
            return match opened_at {
                Some(open) => Err(VdfError::UnclosedBlock(open)),
                None => Ok(entries),
            };
        };

        match &token.kind {
            TokenKind::Close => {
                return match opened_at {
                    Some(_) => Ok(entries),
                    None => Err(VdfError::UnexpectedClose(token.span.start)),
                };
            }
            TokenKind::Open => {
                // A block with no key; nothing in Steam's files does this
                return Err(VdfError::MissingValue(token.span.start));
            }
            TokenKind::Str(key) => {
                let key_span = token.span.clone();
                *pos += 1;

                let value_token = tokens
                    .get(*pos)
                    .ok_or(VdfError::MissingValue(key_span.start))?;

                let value = match &value_token.kind {
                    TokenKind::Str(value) => {
                        *pos += 1;
                        VdfValue::Str {
                            value: value.clone(),
                            span: value_token.span.clone(),
                        }
                    }
                    TokenKind::Open => {
                        let open = value_token.span.start;
                        *pos += 1;
                        let children = parse_entries(tokens, pos, Some(open))?;
                        // parse_entries returned on the matching close brace
                        let close = tokens[*pos].span.start;
                        *pos += 1;
                        VdfValue::Block {
                            open,
                            close,
                            entries: children,
                        }
                    }
                    TokenKind::Close => return Err(VdfError::MissingValue(key_span.start)),
                };

                entries.push(VdfEntry {
                    key: key.clone(),
                    key_span,
                    value,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY_FOLDERS: &str = r#""libraryfolders"
{
	"0"
	{
		"path"		"C:\\Program Files (x86)\\Steam"
		"apps"
		{
			"228980"		"440"
		}
	}
	"1"
	{
		"path"		"D:\\SteamLibrary"
	}
}
"#;

    #[test]
    fn test_nested_blocks() {
        let doc = parse(LIBRARY_FOLDERS).unwrap();
        let lib = doc.find_path(&["libraryfolders", "1"]).unwrap();
        assert_eq!(lib.child("path").and_then(|e| e.as_str()), Some(r"D:\SteamLibrary"));
    }

    #[test]
    fn test_string_values_any_depth() {
        let doc = parse(LIBRARY_FOLDERS).unwrap();
        assert_eq!(
            doc.string_values("path"),
            vec![r"C:\Program Files (x86)\Steam", r"D:\SteamLibrary"]
        );
    }

    #[test]
    fn test_block_spans_point_at_braces() {
        let src = "\"570\"\n{\n}";
        let doc = parse(src).unwrap();
        match &doc.entries[0].value {
            VdfValue::Block { open, close, entries } => {
                assert_eq!(&src[*open..*open + 1], "{");
                assert_eq!(&src[*close..*close + 1], "}");
                assert!(entries.is_empty());
            }
            other => panic!("expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_find_first_block_case_insensitive() {
        let doc = parse("\"A\" { \"apps\" { \"570\" { \"x\" \"1\" } } }").unwrap();
        let block = doc.find_first_block("570").unwrap();
        assert_eq!(block.child("X").and_then(|e| e.as_str()), Some("1"));
    }

    #[test]
    fn test_unclosed_block() {
        assert_eq!(parse("\"a\" {").unwrap_err(), VdfError::UnclosedBlock(4));
    }

    #[test]
    fn test_stray_close() {
        assert_eq!(parse("}").unwrap_err(), VdfError::UnexpectedClose(0));
    }

    #[test]
    fn test_dangling_key() {
        assert_eq!(parse("\"a\" \"b\" \"c\"").unwrap_err(), VdfError::MissingValue(8));
    }
}
