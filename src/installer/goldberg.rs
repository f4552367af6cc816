//! Goldberg Steam Emulator
//!
//! Replaces the game's steam_api library with the bundled emulator build and writes its
//! `steam_settings` folder next to it.
//!
//! ## Module Structure
//! - `types.rs`: GoldbergOptions, SteamApiLib, achievement records
//! - `pure/`: PE bitness, settings file rendering, achievement manifest
//! - `operations/`: library lookup, settings/achievement writing, DLL swap and restore

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

mod operations;
mod pure;
mod types;

pub use operations::{
    find_steam_api, install_replacement, restore_backups, write_achievements, write_steam_settings,
    AchievementSource, SteamWebApi,
};
pub use pure::{detect_bitness, pe_is_64bit};
pub use types::{Achievement, GoldbergOptions, SchemaAchievement, SteamApiLib};

use super::{Applied, InstallTarget, Installer};
use crate::error::{PatchError, Result};
use crate::state::{Component, PatchState};

/// Steam API library names, 64-bit first
pub const STEAM_API_NAMES: [&str; 2] = ["steam_api64.dll", "steam_api.dll"];

pub const SETTINGS_DIR: &str = "steam_settings";

pub struct Goldberg {
    pub options: GoldbergOptions,
    /// Folder holding the bundled `steam_api.dll` / `steam_api64.dll`
    pub bundle_dir: PathBuf,
    pub achievements: Box<dyn AchievementSource>,
}

impl Goldberg {
    pub fn new(options: GoldbergOptions, resources_dir: &Path) -> Self {
        Self {
            options,
            bundle_dir: resources_dir.join("goldberg"),
            achievements: Box::new(SteamWebApi::default()),
        }
    }

    fn bundled_lib(&self, is_64bit: bool) -> Result<PathBuf> {
        let name = if is_64bit { STEAM_API_NAMES[0] } else { STEAM_API_NAMES[1] };
        let path = self.bundle_dir.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(PatchError::DependencyMissing(format!(
                "bundled Goldberg {} ({})",
                name,
                path.display()
            )))
        }
    }
}

impl Installer for Goldberg {
    fn component(&self) -> Component {
        Component::Goldberg
    }

    fn apply(&self, target: &InstallTarget) -> Result<Applied> {
        let lib = find_steam_api(&target.install_dir, target.search_depth).ok_or_else(|| {
            PatchError::DependencyMissing(format!(
                "steam_api.dll / steam_api64.dll under {}",
                target.install_dir.display()
            ))
        })?;
        info!(
            "Found Steam API: {} ({})",
            lib.path.display(),
            if lib.is_64bit { "64-bit" } else { "32-bit" }
        );

        // Check the bundle before touching the game folder
        let replacement = self.bundled_lib(lib.is_64bit)?;

        let settings_dir = lib.dir().join(SETTINGS_DIR);
        fs::create_dir_all(&settings_dir)?;
        write_steam_settings(&settings_dir, &target.app_id, &self.options)?;

        let achievement_count = match self.options.steam_api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => write_achievements(
                &settings_dir,
                &target.app_id,
                key.trim(),
                self.achievements.as_ref(),
                self.options.generate_achievement_images,
            ),
            _ => {
                info!("No Steam Web API key, skipping achievements");
                0
            }
        };

        install_replacement(&lib.path, &replacement)?;

        Ok(Applied::new(format!(
            "Goldberg installed at {} ({} achievements)",
            lib.path.display(),
            achievement_count
        )))
    }

    fn remove(&self, target: &InstallTarget, _state: Option<&PatchState>) -> Result<Vec<String>> {
        let mut removed = restore_backups(&target.install_dir, target.search_depth)?;

        // steam_settings may outlive a backup that was already restored by hand
        if let Some(lib) = find_steam_api(&target.install_dir, target.search_depth) {
            let settings_dir = lib.dir().join(SETTINGS_DIR);
            if settings_dir.is_dir() {
                fs::remove_dir_all(&settings_dir)?;
                removed.push(format!("Removed {}", settings_dir.display()));
            }
        }

        if removed.is_empty() {
            warn!("Nothing to remove for Goldberg in {}", target.install_dir.display());
        }
        Ok(removed)
    }
}
