//! Steamless DRM removal
//!
//! Runs the bundled Steamless CLI on the game executable. Steamless writes
//! `<exe>.unpacked.exe` beside the original; that file replaces the executable and the
//! original is kept as `<exe>.bak`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use super::{Applied, InstallTarget, Installer};
use crate::error::{PatchError, Result};
use crate::state::{Component, PatchState};
use crate::util::{backup_path, relative_path};

pub const STEAMLESS_CLI: &str = "Steamless.CLI.exe";

/// Something that can strip the DRM stub from an executable
pub trait Unpacker {
    /// Produce `unpacked_path(exe)`, or fail
    fn unpack(&self, exe: &Path) -> Result<()>;
}

/// The Steamless command-line tool, optionally run through an interpreter such as mono
pub struct SteamlessCli {
    pub cli: PathBuf,
    pub runner: Option<String>,
}

impl SteamlessCli {
    fn command(&self, exe: &Path) -> Command {
        let mut cmd = match &self.runner {
            Some(runner) => {
                let mut cmd = Command::new(runner);
                cmd.arg(&self.cli);
                cmd
            }
            None => Command::new(&self.cli),
        };
        cmd.args(["--quiet", "--realign", "--recalcchecksum"]).arg(exe);
        cmd
    }
}

impl Unpacker for SteamlessCli {
    fn unpack(&self, exe: &Path) -> Result<()> {
        if !self.cli.is_file() {
            return Err(PatchError::DependencyMissing(format!(
                "Steamless ({})",
                self.cli.display()
            )));
        }

        info!("Running Steamless on {}", exe.display());
        let output = self.command(exe).output().map_err(|e| {
            PatchError::Tool(format!("Could not run {}: {}", self.cli.display(), e))
        })?;

        if !output.status.success() {
            return Err(PatchError::Tool(format!(
                "Steamless failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stdout).trim()
            )));
        }
        Ok(())
    }
}

/// `Game.exe` -> `Game.exe.unpacked.exe`
pub fn unpacked_path(exe: &Path) -> PathBuf {
    let mut name = exe.as_os_str().to_owned();
    name.push(".unpacked.exe");
    PathBuf::from(name)
}

pub struct Steamless {
    pub unpacker: Box<dyn Unpacker>,
}

impl Steamless {
    pub fn new(resources_dir: &Path, runner: Option<String>) -> Self {
        Self {
            unpacker: Box::new(SteamlessCli {
                cli: resources_dir.join("steamless").join(STEAMLESS_CLI),
                runner,
            }),
        }
    }
}

impl Installer for Steamless {
    fn component(&self) -> Component {
        Component::Steamless
    }

    fn apply(&self, target: &InstallTarget) -> Result<Applied> {
        let exe = &target.exe;
        self.unpacker.unpack(exe)?;

        let unpacked = unpacked_path(exe);
        if !unpacked.is_file() {
            return Err(PatchError::Tool(
                "Steamless produced no unpacked file (the executable may not be protected)"
                    .to_string(),
            ));
        }

        let backup = backup_path(exe);
        if backup.exists() {
            // The first original is already safe, this one is an earlier unpack
            fs::remove_file(exe)?;
        } else {
            fs::rename(exe, &backup)?;
            info!("Backed up {}", exe.display());
        }
        fs::rename(&unpacked, exe)?;

        let mut applied = Applied::new(format!("Unpacked {}", exe.display()));
        applied.installed_files = relative_path(exe, &target.install_dir).into_iter().collect();
        Ok(applied)
    }

    fn remove(&self, target: &InstallTarget, state: Option<&PatchState>) -> Result<Vec<String>> {
        // Only the executable we unpacked; other *.exe.bak files belong to someone else
        let exe = state
            .and_then(|s| s.steamless_exe_path(&target.install_dir))
            .unwrap_or_else(|| target.exe.clone());
        let backup = backup_path(&exe);
        if !backup.is_file() {
            warn!("No backup of {}", exe.display());
            return Ok(Vec::new());
        }

        fs::rename(&backup, &exe)?;
        info!("Restored {}", exe.display());
        Ok(vec![format!("Restored {}", exe.display())])
    }
}
