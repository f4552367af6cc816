//! Library backup, replacement and restore

use std::fs;
use std::path::Path;

use tracing::info;

use super::super::{SETTINGS_DIR, STEAM_API_NAMES};
use crate::error::Result;
use crate::util::{backup_path, find_files_named};

/// Back the original up to `<lib>.bak` (only the first time) and copy the emulator over it
pub fn install_replacement(lib: &Path, replacement: &Path) -> Result<()> {
    let backup = backup_path(lib);
    if backup.exists() {
        info!("Backup {} already present, keeping it", backup.display());
    } else {
        fs::copy(lib, &backup)?;
        info!("Backed up {}", lib.display());
    }

    fs::copy(replacement, lib)?;
    info!("Installed {} -> {}", replacement.display(), lib.display());
    Ok(())
}

/// Put every `steam_api*.dll.bak` under `game_dir` back in place and drop the
/// steam_settings folder beside it
pub fn restore_backups(game_dir: &Path, max_depth: usize) -> Result<Vec<String>> {
    let names: Vec<String> = STEAM_API_NAMES
        .iter()
        .map(|name| format!("{}.bak", name))
        .collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

    let mut restored = Vec::new();
    for backup in find_files_named(game_dir, &name_refs, max_depth) {
        let original = backup.with_extension("");
        fs::rename(&backup, &original)?;
        info!("Restored {}", original.display());
        restored.push(format!("Restored {}", original.display()));

        if let Some(dir) = original.parent() {
            let settings = dir.join(SETTINGS_DIR);
            if settings.is_dir() {
                fs::remove_dir_all(&settings)?;
                restored.push(format!("Removed {}", settings.display()));
            }
        }
    }
    Ok(restored)
}
