//! Fix config patching and fix file removal

use std::fs;
use std::path::{Component as PathComponent, Path, PathBuf};

use tracing::{debug, info};

use super::super::pure::set_ini_values;
use super::super::types::IniEdit;
use super::super::UNSTEAM_FILES;
use crate::error::{PatchError, Result};
use crate::util::{find_files_named, remove_file_if_exists};

/// Apply `edits` to the INI file at `path`, leaving everything else as it was
pub fn patch_ini_file(path: &Path, edits: &[IniEdit]) -> Result<()> {
    let content = fs::read_to_string(path)
        .map_err(|e| PatchError::config_mutation(path, e.to_string()))?;
    let patched = set_ini_values(&content, edits);
    if patched != content {
        fs::write(path, patched)?;
    }
    info!("Patched {}", path.display());
    Ok(())
}

/// Archive entries must stay inside the folder they were extracted to
fn is_plain_relative(entry: &str) -> bool {
    let path = Path::new(entry);
    !entry.is_empty()
        && path
            .components()
            .all(|c| matches!(c, PathComponent::Normal(_)))
}

/// Delete what the fix installed: the recorded archive entries (relative to `exe_dir`)
/// plus every known fix file in `exe_dir`, `install_dir` or below it
pub fn remove_fix_files(
    exe_dir: &Path,
    install_dir: &Path,
    recorded: &[String],
    max_depth: usize,
) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    let mut touched_dirs: Vec<PathBuf> = Vec::new();

    for entry in recorded {
        if !is_plain_relative(entry) {
            debug!("Ignoring recorded entry {}", entry);
            continue;
        }
        let path = exe_dir.join(entry);
        if remove_file_if_exists(&path)? {
            removed.push(format!("Removed {}", path.display()));
        }
        if let Some(parent) = path.parent()
            && parent != exe_dir
        {
            touched_dirs.push(parent.to_path_buf());
        }
    }

    let mut known: Vec<PathBuf> = Vec::new();
    for dir in [exe_dir, install_dir] {
        for name in UNSTEAM_FILES {
            known.push(dir.join(name));
        }
    }
    known.extend(find_files_named(install_dir, &UNSTEAM_FILES, max_depth));

    for path in known {
        if remove_file_if_exists(&path)? {
            removed.push(format!("Removed {}", path.display()));
        }
    }

    // Folders the archive created, deepest first; non-empty ones stay
    touched_dirs.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));
    touched_dirs.dedup();
    for dir in touched_dirs {
        if fs::remove_dir(&dir).is_ok() {
            debug!("Removed empty folder {}", dir.display());
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = patch_ini_file(
            &dir.path().join("unsteam.ini"),
            &[IniEdit::new("game", "real_app_id", "1")],
        )
        .unwrap_err();
        assert!(matches!(err, PatchError::ConfigMutation { .. }));
    }

    #[test]
    fn test_recorded_entries_cannot_escape() {
        assert!(is_plain_relative("unsteam.ini"));
        assert!(is_plain_relative("sub/file.dll"));
        assert!(!is_plain_relative("../steam.exe"));
        assert!(!is_plain_relative("/etc/passwd"));
        assert!(!is_plain_relative(""));
    }

    #[test]
    fn test_remove_recorded_and_known_files() {
        let game = tempfile::tempdir().unwrap();
        let exe_dir = game.path().join("bin");
        fs::create_dir_all(exe_dir.join("lang")).unwrap();
        for name in UNSTEAM_FILES {
            fs::write(exe_dir.join(name), "").unwrap();
        }
        fs::write(exe_dir.join("lang/en.txt"), "").unwrap();
        fs::write(game.path().join("unsteam.ini"), "").unwrap();
        fs::write(exe_dir.join("Game.exe"), "").unwrap();

        let recorded = vec!["unsteam.ini".to_string(), "lang/en.txt".to_string()];
        let removed = remove_fix_files(&exe_dir, game.path(), &recorded, 3).unwrap();

        assert_eq!(removed.len(), 5);
        assert!(!exe_dir.join("lang").exists());
        assert!(!game.path().join("unsteam.ini").exists());
        assert!(exe_dir.join("Game.exe").exists());
    }
}
