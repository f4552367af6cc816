//! Steam client integration - finding Steam and its games
//!
//! Everything that reads Steam's own on-disk metadata or touches the client process:
//! - `locate`: install root discovery and library enumeration
//! - `game`: appmanifest lookup by AppID
//! - `executable`: primary executable heuristic inside a game folder
//! - `process`: stopping/restarting the client around config edits
//! - `catalog`: remote AppID/name list for search

mod catalog;
mod executable;
mod game;
mod locate;
mod process;

pub use catalog::{AppCatalog, CatalogApp, APP_LIST_URL, SEARCH_LIMIT};
pub use executable::{find_primary_executable, is_executable_candidate, EXCLUDED_KEYWORDS};
pub use game::{find_game_by_app_id, read_install_dir, validate_app_id};
pub use locate::{
    find_install_root, is_valid_install_root, list_library_roots, InstallRootSearch, LAUNCHER_EXE,
};
pub use process::{LauncherControl, SteamProcess};

use std::path::{Path, PathBuf};

/// A validated Steam installation
#[derive(Debug, Clone, PartialEq)]
pub struct SteamInstall {
    pub root: PathBuf,
}

impl SteamInstall {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn launcher_exe(&self) -> PathBuf {
        self.root.join(LAUNCHER_EXE)
    }

    /// `userdata/` holds one directory per Steam account that ever logged in here
    pub fn userdata_dir(&self) -> PathBuf {
        self.root.join("userdata")
    }

    pub fn library_roots(&self) -> Vec<PathBuf> {
        list_library_roots(&self.root)
    }

    /// `localconfig.vdf` of every profile that has one
    pub fn profile_configs(&self) -> Vec<PathBuf> {
        profile_configs_in(&self.userdata_dir())
    }
}

fn profile_configs_in(userdata: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let Ok(entries) = std::fs::read_dir(userdata) else {
        return configs;
    };

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    for dir in dirs {
        let cfg = dir.join("config").join("localconfig.vdf");
        if cfg.is_file() {
            configs.push(cfg);
        }
    }
    configs
}
