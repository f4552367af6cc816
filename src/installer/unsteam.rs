//! Online fix (unsteam loader)
//!
//! Downloads the fix archive, unpacks it next to the game executable and points its
//! `unsteam.ini` at the game. The loader itself is started by Steam through the
//! launch option set by `launch_config`; that part is not done here.
//!
//! ## Module Structure
//! - `types.rs`: PlayerIdentity, IniEdit
//! - `pure/`: INI key editing
//! - `operations/`: download, extraction, INI patching, file removal

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

mod operations;
mod pure;
mod types;

pub use operations::{
    default_extractor, list_archive_entries, patch_ini_file, remove_fix_files, Extractor,
    FixSource, HttpFixSource, SevenZip, ZipExtractor,
};
#[cfg(test)]
pub(crate) use operations::write_zip;
pub use pure::set_ini_values;
pub use types::{IniEdit, PlayerIdentity};

use super::{Applied, InstallTarget, Installer};
use crate::error::{PatchError, Result};
use crate::state::{Component, PatchState};
use crate::util::remove_file_if_exists;

pub const UNSTEAM_INI: &str = "unsteam.ini";
pub const UNSTEAM_DLL: &str = "unsteam64.dll";
pub const LOADER_EXE: &str = "unsteam_loader64.exe";

/// Files the fix always installs
pub const UNSTEAM_FILES: [&str; 3] = [UNSTEAM_INI, UNSTEAM_DLL, LOADER_EXE];

/// Substring identifying our launch option when clearing it
pub const LOADER_MARKER: &str = "unsteam_loader";

pub struct Unsteam {
    pub source: Box<dyn FixSource>,
    pub extractor: Box<dyn Extractor>,
    pub identity: PlayerIdentity,
    /// Where the archive is downloaded to before extraction
    pub temp_dir: PathBuf,
}

impl Unsteam {
    pub fn new(url: &str, resources_dir: &Path, identity: PlayerIdentity) -> Self {
        Self {
            source: Box::new(HttpFixSource {
                url: url.to_string(),
            }),
            extractor: default_extractor(resources_dir),
            identity,
            temp_dir: std::env::temp_dir(),
        }
    }

    fn ini_edits(&self, target: &InstallTarget) -> Vec<IniEdit> {
        let mut edits = vec![
            IniEdit::new("loader", "exe_file", target.exe.to_string_lossy()),
            IniEdit::new(
                "loader",
                "dll_file",
                target.exe_dir().join(UNSTEAM_DLL).to_string_lossy(),
            ),
            IniEdit::new("game", "real_app_id", target.app_id.as_str()),
        ];
        if let Some(id) = non_empty(&self.identity.steam_id) {
            edits.push(IniEdit::new("player", "steam_id", id));
        }
        if let Some(name) = non_empty(&self.identity.player_name) {
            edits.push(IniEdit::new("player", "player_name", name));
        }
        edits
    }

    fn install_from(&self, archive: &Path, target: &InstallTarget) -> Result<Applied> {
        let exe_dir = target.exe_dir();

        let entries = match list_archive_entries(archive) {
            Ok(entries) => entries,
            Err(e) => {
                // 7-Zip can still handle formats the zip reader can't
                warn!("Could not list archive entries: {}", e);
                Vec::new()
            }
        };

        // Game files the archive overwrites are not ours to delete later
        let (replaced, installed): (Vec<String>, Vec<String>) = entries
            .into_iter()
            .partition(|entry| exe_dir.join(entry).is_file());
        for entry in &replaced {
            warn!("Fix archive overwrites existing {}", exe_dir.join(entry).display());
        }

        self.extractor.extract(archive, exe_dir)?;

        let ini = exe_dir.join(UNSTEAM_INI);
        if !ini.is_file() {
            return Err(PatchError::config_mutation(
                &ini,
                "unsteam.ini not found after extraction",
            ));
        }

        let mut copies = vec![ini.clone()];
        if exe_dir != target.install_dir {
            let root_copy = target.install_dir.join(UNSTEAM_INI);
            fs::copy(&ini, &root_copy)?;
            info!("Copied {} to {}", UNSTEAM_INI, root_copy.display());
            copies.push(root_copy);
        }

        let edits = self.ini_edits(target);
        for copy in &copies {
            patch_ini_file(copy, &edits)?;
        }

        let mut applied = Applied::new(format!("Online fix installed in {}", exe_dir.display()));
        applied.installed_files = installed;
        Ok(applied)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// The loader the launch option must start
pub fn loader_path(target: &InstallTarget) -> PathBuf {
    target.exe_dir().join(LOADER_EXE)
}

/// `"<loader>" %command%`
pub fn launch_command(loader: &Path) -> String {
    format!("\"{}\" %command%", loader.display())
}

impl Installer for Unsteam {
    fn component(&self) -> Component {
        Component::Unsteam
    }

    fn apply(&self, target: &InstallTarget) -> Result<Applied> {
        let archive = self
            .temp_dir
            .join(format!("globalfix-{}.zip", target.app_id));

        if let Err(e) = self.source.fetch(&archive) {
            let _ = remove_file_if_exists(&archive);
            return Err(e);
        }

        let result = self.install_from(&archive, target);

        if let Err(e) = remove_file_if_exists(&archive) {
            warn!("Could not delete {}: {}", archive.display(), e);
        }
        result
    }

    fn remove(&self, target: &InstallTarget, state: Option<&PatchState>) -> Result<Vec<String>> {
        let recorded = state.map(|s| s.unsteam_files.as_slice()).unwrap_or_default();
        remove_fix_files(
            target.exe_dir(),
            &target.install_dir,
            recorded,
            target.search_depth,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::find_files_named;

    /// Serves a prebuilt archive from disk
    struct LocalFixSource {
        archive: PathBuf,
    }

    impl FixSource for LocalFixSource {
        fn fetch(&self, dest: &Path) -> Result<()> {
            fs::copy(&self.archive, dest)?;
            Ok(())
        }
    }

    struct FailingSource;

    impl FixSource for FailingSource {
        fn fetch(&self, _dest: &Path) -> Result<()> {
            Err(PatchError::Network("Too many redirects".into()))
        }
    }

    const FIX_INI: &str = "[loader]\nexe_file=\ndll_file=\n\n[game]\nreal_app_id=\n";

    fn game_with_subdir_exe() -> (tempfile::TempDir, InstallTarget) {
        let game = tempfile::tempdir().unwrap();
        fs::create_dir_all(game.path().join("Binaries/Win64")).unwrap();
        fs::write(game.path().join("Binaries/Win64/PTTR.exe"), "").unwrap();
        let target = InstallTarget {
            app_id: "337320".to_string(),
            install_dir: game.path().to_path_buf(),
            exe: game.path().join("Binaries/Win64/PTTR.exe"),
            search_depth: 3,
        };
        (game, target)
    }

    fn unsteam_with_archive(work: &Path, entries: &[(&str, &str)]) -> Unsteam {
        let archive = work.join("GlobalFix.zip");
        write_zip(&archive, entries);
        let temp_dir = work.join("tmp");
        fs::create_dir_all(&temp_dir).unwrap();
        Unsteam {
            source: Box::new(LocalFixSource { archive }),
            extractor: Box::new(ZipExtractor),
            identity: PlayerIdentity::default(),
            temp_dir,
        }
    }

    #[test]
    fn test_apply_then_remove_round_trip() {
        let work = tempfile::tempdir().unwrap();
        let (game, target) = game_with_subdir_exe();
        let mut unsteam = unsteam_with_archive(
            work.path(),
            &[
                ("unsteam.ini", FIX_INI),
                ("unsteam64.dll", "dll"),
                ("unsteam_loader64.exe", "exe"),
            ],
        );
        unsteam.identity = PlayerIdentity {
            steam_id: Some("76561198000000001".to_string()),
            player_name: Some("Tester".to_string()),
        };

        let applied = unsteam.apply(&target).unwrap();
        assert_eq!(applied.installed_files.len(), 3);

        let exe_dir = game.path().join("Binaries/Win64");
        for ini in [exe_dir.join(UNSTEAM_INI), game.path().join(UNSTEAM_INI)] {
            let content = fs::read_to_string(&ini).unwrap();
            assert!(content.contains("real_app_id=337320\n"));
            assert!(content.contains(&format!("exe_file={}\n", target.exe.display())));
            assert!(content.contains("[player]\nplayer_name=Tester\nsteam_id=76561198000000001\n"));
        }
        // Temp archive cleaned up
        assert!(!work.path().join("tmp/globalfix-337320.zip").exists());

        let mut state = PatchState::new("337320", Default::default());
        state.unsteam_files = applied.installed_files;
        unsteam.remove(&target, Some(&state)).unwrap();

        assert!(find_files_named(game.path(), &UNSTEAM_FILES, 5).is_empty());
        assert!(target.exe.exists());
    }

    #[test]
    fn test_overwritten_game_file_survives_remove() {
        let work = tempfile::tempdir().unwrap();
        let (game, target) = game_with_subdir_exe();
        let exe_dir = game.path().join("Binaries/Win64");
        fs::write(exe_dir.join("steam_appid.txt"), "337320").unwrap();
        let unsteam = unsteam_with_archive(
            work.path(),
            &[
                ("unsteam.ini", FIX_INI),
                ("unsteam64.dll", "dll"),
                ("steam_appid.txt", "480"),
            ],
        );

        let applied = unsteam.apply(&target).unwrap();
        assert_eq!(applied.installed_files, vec!["unsteam.ini", "unsteam64.dll"]);

        let mut state = PatchState::new("337320", Default::default());
        state.unsteam_files = applied.installed_files;
        unsteam.remove(&target, Some(&state)).unwrap();

        assert!(exe_dir.join("steam_appid.txt").is_file());
        assert!(!exe_dir.join(UNSTEAM_DLL).exists());
    }

    #[test]
    fn test_missing_ini_after_extraction() {
        let work = tempfile::tempdir().unwrap();
        let (_game, target) = game_with_subdir_exe();
        let unsteam = unsteam_with_archive(work.path(), &[("unsteam64.dll", "dll")]);

        let err = unsteam.apply(&target).unwrap_err();
        assert!(err.to_string().contains("unsteam.ini not found"));
        assert!(!work.path().join("tmp/globalfix-337320.zip").exists());
    }

    #[test]
    fn test_download_failure_aborts_before_extraction() {
        let work = tempfile::tempdir().unwrap();
        let (game, target) = game_with_subdir_exe();
        let unsteam = Unsteam {
            source: Box::new(FailingSource),
            extractor: Box::new(ZipExtractor),
            identity: PlayerIdentity::default(),
            temp_dir: work.path().to_path_buf(),
        };

        assert!(matches!(unsteam.apply(&target), Err(PatchError::Network(_))));
        assert!(!game.path().join(UNSTEAM_INI).exists());
    }

    #[test]
    fn test_launch_command_quotes_loader() {
        assert_eq!(
            launch_command(Path::new("/g/unsteam_loader64.exe")),
            "\"/g/unsteam_loader64.exe\" %command%"
        );
    }
}
