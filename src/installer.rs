//! Component installers - the three reversible game patches
//!
//! Three independent, reversible modifications:
//! - Steamless: strips the SteamStub DRM wrapper from the main executable
//! - Unsteam: the online fix loader, started through a Steam launch option
//! - Goldberg: Steam API emulator swapped in for the game's steam_api library
//!
//! Each installer handles its own failures and reports them; the caller decides what
//! a failure means for the request as a whole.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PatchError, Result};
use crate::state::{Component, PatchState};

pub mod goldberg;
pub mod steamless;
pub mod unsteam;

pub use goldberg::{Goldberg, GoldbergOptions};
pub use steamless::Steamless;
pub use unsteam::Unsteam;

/// A resolved game on disk
#[derive(Debug, Clone, PartialEq)]
pub struct InstallTarget {
    pub app_id: String,
    pub install_dir: PathBuf,
    pub exe: PathBuf,
    /// Bound for every recursive lookup inside `install_dir`
    pub search_depth: usize,
}

impl InstallTarget {
    pub fn exe_dir(&self) -> &Path {
        self.exe.parent().unwrap_or(&self.install_dir)
    }

    pub fn exe_name(&self) -> String {
        self.exe
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// What a successful apply left behind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Applied {
    pub message: String,
    /// Files the component added or replaced: the online fix's relative to the
    /// executable's folder, Steamless's relative to the install folder
    pub installed_files: Vec<String>,
}

impl Applied {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            installed_files: Vec::new(),
        }
    }
}

/// Per-component entry in a response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentReport {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: &PatchError) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

/// One reversible modification of a game folder
pub trait Installer {
    fn component(&self) -> Component;

    fn apply(&self, target: &InstallTarget) -> Result<Applied>;

    /// Undo the modification. Returns a line per item removed or restored.
    fn remove(&self, target: &InstallTarget, state: Option<&PatchState>) -> Result<Vec<String>>;
}
