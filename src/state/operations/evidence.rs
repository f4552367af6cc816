//! On-disk signals for each component

use std::path::Path;

use super::super::types::{ComponentEvidence, PatchEvidence, PatchState};
use crate::installer::goldberg::STEAM_API_NAMES;
use crate::installer::unsteam::UNSTEAM_INI;
use crate::util::{backup_path, find_files_named, find_files_with_suffix};

/// Whether the Steamless backup is on disk. Only the recorded executable, or failing
/// that `exe`, is checked; any `*.exe.bak` counts only when neither is known.
fn steamless_backup_exists(
    install_dir: &Path,
    state: Option<&PatchState>,
    exe: Option<&Path>,
    max_depth: usize,
) -> bool {
    let recorded = state.and_then(|s| s.steamless_exe_path(install_dir));
    match recorded.as_deref().or(exe) {
        Some(exe) => backup_path(exe).is_file(),
        None => !find_files_with_suffix(install_dir, ".exe.bak", max_depth).is_empty(),
    }
}

/// Pair the record (if any) with what is actually in `install_dir`. `exe` is the
/// game's executable when it is known.
pub fn gather_evidence(
    install_dir: &Path,
    state: Option<&PatchState>,
    exe: Option<&Path>,
    max_depth: usize,
) -> PatchEvidence {
    let declared = state.map(PatchState::flags).unwrap_or_default();

    let api_backups: Vec<String> = STEAM_API_NAMES
        .iter()
        .map(|name| backup_path(Path::new(name)).to_string_lossy().into_owned())
        .collect();
    let api_backup_refs: Vec<&str> = api_backups.iter().map(String::as_str).collect();

    PatchEvidence {
        steamless: ComponentEvidence {
            declared_applied: declared.steamless,
            backup_exists: steamless_backup_exists(install_dir, state, exe, max_depth),
        },
        unsteam: ComponentEvidence {
            declared_applied: declared.unsteam,
            backup_exists: !find_files_named(install_dir, &[UNSTEAM_INI], max_depth).is_empty(),
        },
        goldberg: ComponentEvidence {
            declared_applied: declared.goldberg,
            backup_exists: !find_files_named(install_dir, &api_backup_refs, max_depth).is_empty(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{removal_defaults, ComponentFlags};
    use std::fs;

    #[test]
    fn test_evidence_from_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        fs::write(dir.path().join("bin/steam_api64.dll.bak"), "").unwrap();
        fs::write(dir.path().join("bin/Game.exe.bak"), "").unwrap();

        let evidence = gather_evidence(dir.path(), None, None, 3);
        assert!(evidence.goldberg.backup_exists);
        assert!(evidence.steamless.backup_exists);
        assert!(!evidence.unsteam.backup_exists);
        assert!(!evidence.goldberg.declared_applied);
    }

    #[test]
    fn test_evidence_combines_record() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(UNSTEAM_INI), "[game]\n").unwrap();
        let state = PatchState::new(
            "570",
            ComponentFlags {
                unsteam: true,
                goldberg: true,
                ..Default::default()
            },
        );

        let evidence = gather_evidence(dir.path(), Some(&state), None, 3);
        assert!(evidence.unsteam.declared_applied && evidence.unsteam.backup_exists);
        assert!(evidence.goldberg.declared_applied && !evidence.goldberg.backup_exists);

        let defaults = removal_defaults(&evidence);
        assert!(defaults.unsteam && defaults.goldberg && !defaults.steamless);
    }

    #[test]
    fn test_foreign_exe_backup_is_not_steamless() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tools")).unwrap();
        fs::write(dir.path().join("tools/Editor.exe.bak"), "").unwrap();
        fs::write(dir.path().join("Game.exe"), "").unwrap();
        let exe = dir.path().join("Game.exe");

        let evidence = gather_evidence(dir.path(), None, Some(&exe), 3);
        assert!(!evidence.steamless.backup_exists);

        fs::write(dir.path().join("Game.exe.bak"), "").unwrap();
        let evidence = gather_evidence(dir.path(), None, Some(&exe), 3);
        assert!(evidence.steamless.backup_exists);
    }

    #[test]
    fn test_recorded_exe_wins_over_given_exe() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        fs::write(dir.path().join("bin/Real.exe.bak"), "").unwrap();
        let mut state = PatchState::new(
            "570",
            ComponentFlags {
                steamless: true,
                ..Default::default()
            },
        );
        state.steamless_exe = Some("bin/Real.exe".to_string());

        let guessed = dir.path().join("Other.exe");
        let evidence = gather_evidence(dir.path(), Some(&state), Some(&guessed), 3);
        assert!(evidence.steamless.declared_applied && evidence.steamless.backup_exists);
    }
}
