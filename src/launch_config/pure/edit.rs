//! LaunchOptions edits inside localconfig.vdf
//!
//! Edits are byte splices at parsed spans, so everything Steam wrote around the
//! changed entry stays exactly as it was.

use super::super::types::{APPS_PATH, LAUNCH_OPTIONS_KEY};
use crate::vdf::{self, TextEdit, VdfDocument, VdfEntry, VdfError, VdfValue};

/// The app's block: the canonical `.../Steam/apps/<appid>` location first, otherwise the
/// first block anywhere keyed by the AppID
fn find_app_block<'a>(doc: &'a VdfDocument, app_id: &str) -> Option<&'a VdfEntry> {
    let mut path: Vec<&str> = APPS_PATH.to_vec();
    path.push(app_id);
    doc.find_path(&path)
        .filter(|entry| entry.is_block())
        .or_else(|| doc.find_first_block(app_id))
}

pub fn has_app_block(content: &str, app_id: &str) -> Result<bool, VdfError> {
    let doc = vdf::parse(content)?;
    Ok(find_app_block(&doc, app_id).is_some())
}

/// Set the app's LaunchOptions to `command`. `None` when the file has no block for the app.
pub fn set_launch_options(
    content: &str,
    app_id: &str,
    command: &str,
) -> Result<Option<String>, VdfError> {
    let doc = vdf::parse(content)?;
    let Some(block) = find_app_block(&doc, app_id) else {
        return Ok(None);
    };

    let quoted = format!("\"{}\"", vdf::escape(command));
    let existing = block
        .child(LAUNCH_OPTIONS_KEY)
        .and_then(|entry| match &entry.value {
            VdfValue::Str { span, .. } => Some(span.clone()),
            VdfValue::Block { .. } => None,
        });

    let edit = match existing {
        Some(span) => TextEdit::replace(span, quoted),
        None => {
            let VdfValue::Block { open, .. } = &block.value else {
                return Ok(None);
            };
            let indent = vdf::line_indent(content, block.key_span.start);
            TextEdit::insert(
                open + 1,
                format!("\n{}\t\"{}\"\t\t{}", indent, LAUNCH_OPTIONS_KEY, quoted),
            )
        }
    };

    Ok(Some(vdf::apply_edits(content, vec![edit])))
}

/// Drop the app's LaunchOptions if its value contains `marker` (case-insensitive).
/// `None` when nothing needed changing.
pub fn clear_launch_options(
    content: &str,
    app_id: &str,
    marker: &str,
) -> Result<Option<String>, VdfError> {
    let doc = vdf::parse(content)?;
    let Some(entry) = find_app_block(&doc, app_id).and_then(|b| b.child(LAUNCH_OPTIONS_KEY))
    else {
        return Ok(None);
    };
    let Some(value) = entry.as_str() else {
        return Ok(None);
    };
    if !value.to_lowercase().contains(&marker.to_lowercase()) {
        return Ok(None);
    }

    let span = entry.full_span();
    let line = vdf::line_range(content, span.start);
    // Remove the whole line when the entry is alone on it
    let edit = if content[line.clone()].trim() == content[span.clone()].trim() {
        TextEdit::delete(line)
    } else {
        TextEdit::delete(span)
    };
    Ok(Some(vdf::apply_edits(content, vec![edit])))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCALCONFIG: &str = "\"UserLocalConfigStore\"\n{\n\t\"Software\"\n\t{\n\t\t\"Valve\"\n\t\t{\n\t\t\t\"Steam\"\n\t\t\t{\n\t\t\t\t\"apps\"\n\t\t\t\t{\n\t\t\t\t\t\"570\"\n\t\t\t\t\t{\n\t\t\t\t\t\t\"LastPlayed\"\t\t\"1700000000\"\n\t\t\t\t\t}\n\t\t\t\t}\n\t\t\t}\n\t\t}\n\t}\n}\n";

    #[test]
    fn test_insert_into_empty_block() {
        let out = set_launch_options("\"570\"\n{\n}", "570", "\"C:\\g\\loader.exe\" %command%")
            .unwrap()
            .unwrap();
        assert_eq!(
            out,
            "\"570\"\n{\n\t\"LaunchOptions\"\t\t\"\\\"C:\\\\g\\\\loader.exe\\\" %command%\"\n}"
        );
    }

    #[test]
    fn test_insert_matches_block_indent() {
        let out = set_launch_options(LOCALCONFIG, "570", "x %command%")
            .unwrap()
            .unwrap();
        assert!(out.contains(
            "\t\t\t\t\t\"570\"\n\t\t\t\t\t{\n\t\t\t\t\t\t\"LaunchOptions\"\t\t\"x %command%\"\n\t\t\t\t\t\t\"LastPlayed\""
        ));
    }

    #[test]
    fn test_replace_existing_value_only() {
        let content = "\"570\"\n{\n\t\"LaunchOptions\"\t\t\"-novid\"\n\t\"x\"\t\"y\"\n}\n";
        let out = set_launch_options(content, "570", "new").unwrap().unwrap();
        assert_eq!(out, "\"570\"\n{\n\t\"LaunchOptions\"\t\t\"new\"\n\t\"x\"\t\"y\"\n}\n");
    }

    #[test]
    fn test_missing_block_is_none() {
        assert_eq!(set_launch_options(LOCALCONFIG, "440", "x").unwrap(), None);
    }

    #[test]
    fn test_canonical_block_preferred() {
        // A "570" key elsewhere (e.g. under a cloud section) comes first in the file
        let content = "\"Other\"\n{\n\t\"570\"\n\t{\n\t}\n}\n".to_string() + LOCALCONFIG;
        let out = set_launch_options(&content, "570", "y").unwrap().unwrap();
        assert!(out.starts_with("\"Other\"\n{\n\t\"570\"\n\t{\n\t}\n}\n"));
        assert!(out.contains("\"LaunchOptions\"\t\t\"y\""));
    }

    #[test]
    fn test_clear_only_our_option() {
        let ours = "\"570\"\n{\n\t\"LaunchOptions\"\t\t\"\\\"D:\\\\g\\\\unsteam_loader64.exe\\\" %command%\"\n\t\"x\"\t\"y\"\n}\n";
        let out = clear_launch_options(ours, "570", "unsteam_loader").unwrap().unwrap();
        assert_eq!(out, "\"570\"\n{\n\t\"x\"\t\"y\"\n}\n");

        let users = "\"570\"\n{\n\t\"LaunchOptions\"\t\t\"-novid -high\"\n}\n";
        assert_eq!(clear_launch_options(users, "570", "unsteam_loader").unwrap(), None);
    }

    #[test]
    fn test_has_app_block() {
        assert!(has_app_block(LOCALCONFIG, "570").unwrap());
        assert!(!has_app_block(LOCALCONFIG, "440").unwrap());
        assert!(has_app_block("\"a\" {", "570").is_err());
    }
}
