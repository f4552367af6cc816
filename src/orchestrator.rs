//! Orchestrator - sequencing of a whole patch request
//!
//! Resolves the game, runs the selected installers in a fixed order, edits launch
//! options when the online fix is involved, and keeps the per-game record current.
//!
//! ## Module Structure
//! - `types.rs`: request/response shapes
//! - `pipelines/`: apply, remove and locate flows

use std::path::PathBuf;

mod pipelines;
mod types;

#[cfg(test)]
mod testing;

pub use pipelines::{apply_fix, locate, remove_fix, resolve_target};
pub use types::{
    ApplyRequest, ApplyResponse, ComponentStatus, GameStatus, LocateResponse, RemoveRequest,
    RemoveResponse,
};

use crate::config::GlobalFixConfig;
use crate::error::Result;
use crate::installer::unsteam::PlayerIdentity;
use crate::installer::{Goldberg, GoldbergOptions, Installer, Steamless, Unsteam};
use crate::paths::PATH_RES;
use crate::steam::{find_install_root, LauncherControl, SteamInstall, SteamProcess};

/// Builds the installers for a request
pub trait InstallerFactory {
    fn steamless(&self) -> Box<dyn Installer>;
    fn unsteam(&self, identity: PlayerIdentity) -> Box<dyn Installer>;
    fn goldberg(&self, options: GoldbergOptions) -> Box<dyn Installer>;
}

/// Installers backed by the bundled resources, the fix URL and the real tools
pub struct HostInstallers {
    pub resources_dir: PathBuf,
    pub globalfix_url: String,
    pub steamless_runner: Option<String>,
}

impl HostInstallers {
    pub fn from_cfg(cfg: &GlobalFixConfig) -> Self {
        Self {
            resources_dir: cfg.resources_dir.clone().unwrap_or_else(|| PATH_RES.clone()),
            globalfix_url: cfg.globalfix_url.clone(),
            steamless_runner: cfg.steamless_runner.clone(),
        }
    }
}

impl InstallerFactory for HostInstallers {
    fn steamless(&self) -> Box<dyn Installer> {
        Box::new(Steamless::new(
            &self.resources_dir,
            self.steamless_runner.clone(),
        ))
    }

    fn unsteam(&self, identity: PlayerIdentity) -> Box<dyn Installer> {
        Box::new(Unsteam::new(
            &self.globalfix_url,
            &self.resources_dir,
            identity,
        ))
    }

    fn goldberg(&self, options: GoldbergOptions) -> Box<dyn Installer> {
        Box::new(Goldberg::new(options, &self.resources_dir))
    }
}

/// Everything a request needs, resolved once per run
pub struct Patcher {
    pub cfg: GlobalFixConfig,
    pub steam: SteamInstall,
    pub launcher: Box<dyn LauncherControl>,
    pub installers: Box<dyn InstallerFactory>,
}

impl Patcher {
    /// Locate Steam on this machine and wire up the real collaborators
    pub fn from_host(cfg: GlobalFixConfig) -> Result<Self> {
        let steam = SteamInstall::new(find_install_root(&cfg)?);
        let launcher = Box::new(SteamProcess::new(steam.launcher_exe()));
        let installers = Box::new(HostInstallers::from_cfg(&cfg));
        Ok(Self {
            cfg,
            steam,
            launcher,
            installers,
        })
    }

    pub fn apply(&self, req: &ApplyRequest) -> ApplyResponse {
        apply_fix(self, req)
    }

    pub fn remove(&self, req: &RemoveRequest) -> RemoveResponse {
        remove_fix(self, req)
    }

    pub fn locate(&self, app_id: Option<&str>) -> LocateResponse {
        locate(self, app_id)
    }
}
