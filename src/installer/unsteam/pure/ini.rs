//! Targeted `key=value` edits in an INI file
//!
//! Only the requested keys change. Every other line, comment and blank keeps its exact
//! bytes, including CRLF endings.

use super::super::types::IniEdit;

fn section_name(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix('[')?
        .strip_suffix(']')
        .map(str::trim)
}

fn key_of(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with(';') || trimmed.starts_with('#') {
        return None;
    }
    trimmed.split_once('=').map(|(key, _)| key.trim())
}

/// Rewrite the value of a `key=value` line, keeping indentation, key casing,
/// spacing around `=` and the line ending
fn rewrite_line(line: &str, value: &str) -> String {
    let ending = if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    };
    let body = &line[..line.len() - ending.len()];
    let indent = &body[..body.len() - body.trim_start().len()];
    let rest = &body[indent.len()..];
    let Some(eq_pos) = rest.find('=') else {
        return line.to_string();
    };
    let key = rest[..eq_pos].trim_end();

    if rest.contains(" = ") {
        format!("{}{} = {}{}", indent, key, value, ending)
    } else {
        format!("{}{}={}{}", indent, key, value, ending)
    }
}

fn ensure_terminated(line: &mut String, newline: &str) {
    if !line.ends_with('\n') {
        line.push_str(newline);
    }
}

fn apply_one(lines: &mut Vec<String>, edit: &IniEdit, newline: &str) {
    let mut in_section = false;
    let mut header_idx = None;

    for i in 0..lines.len() {
        if let Some(name) = section_name(&lines[i]) {
            in_section = name.eq_ignore_ascii_case(edit.section);
            if in_section && header_idx.is_none() {
                header_idx = Some(i);
            }
            continue;
        }
        let matches = in_section
            && key_of(&lines[i])
                .map(|key| key.eq_ignore_ascii_case(edit.key))
                .unwrap_or(false);
        if matches {
            lines[i] = rewrite_line(&lines[i], &edit.value);
            return;
        }
    }

    let new_line = format!("{}={}{}", edit.key, edit.value, newline);
    match header_idx {
        Some(i) => {
            ensure_terminated(&mut lines[i], newline);
            lines.insert(i + 1, new_line);
        }
        None => {
            if let Some(last) = lines.last_mut() {
                ensure_terminated(last, newline);
                lines.push(newline.to_string());
            }
            lines.push(format!("[{}]{}", edit.section, newline));
            lines.push(new_line);
        }
    }
}

/// Apply `edits` in order. Existing keys are replaced in place, missing keys go right
/// after their section header, missing sections are appended.
pub fn set_ini_values(content: &str, edits: &[IniEdit]) -> String {
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
    for edit in edits {
        apply_one(&mut lines, edit, newline);
    }
    lines.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "; unsteam config\n[loader]\nexe_file=\n  dll_file = old.dll\n\n[game]\n;real_app_id=480\nreal_app_id=480\n";

    #[test]
    fn test_replace_in_place_preserving_layout() {
        let out = set_ini_values(
            SAMPLE,
            &[
                IniEdit::new("loader", "exe_file", r"C:\Games\X\x.exe"),
                IniEdit::new("loader", "dll_file", r"C:\Games\X\unsteam64.dll"),
                IniEdit::new("game", "real_app_id", "337320"),
            ],
        );
        assert_eq!(
            out,
            "; unsteam config\n[loader]\nexe_file=C:\\Games\\X\\x.exe\n  dll_file = C:\\Games\\X\\unsteam64.dll\n\n[game]\n;real_app_id=480\nreal_app_id=337320\n"
        );
    }

    #[test]
    fn test_missing_key_goes_after_header() {
        let out = set_ini_values("[player]\nother=1\n", &[IniEdit::new("player", "player_name", "Bob")]);
        assert_eq!(out, "[player]\nplayer_name=Bob\nother=1\n");
    }

    #[test]
    fn test_missing_section_appended() {
        let out = set_ini_values("[loader]\nexe_file=a", &[IniEdit::new("player", "steam_id", "7656")]);
        assert_eq!(out, "[loader]\nexe_file=a\n\n[player]\nsteam_id=7656\n");
    }

    #[test]
    fn test_key_only_matched_in_its_section() {
        let out = set_ini_values(
            "[other]\nsteam_id=1\n[player]\n",
            &[IniEdit::new("player", "steam_id", "2")],
        );
        assert_eq!(out, "[other]\nsteam_id=1\n[player]\nsteam_id=2\n");
    }

    #[test]
    fn test_crlf_preserved() {
        let out = set_ini_values(
            "[game]\r\nreal_app_id=1\r\n",
            &[
                IniEdit::new("game", "real_app_id", "570"),
                IniEdit::new("player", "player_name", "A"),
            ],
        );
        assert_eq!(out, "[game]\r\nreal_app_id=570\r\n\r\n[player]\r\nplayer_name=A\r\n");
    }
}
