//! Error taxonomy shared by every stage of a patch request.

use std::path::PathBuf;
use thiserror::Error;

/// A target could not be resolved. Always fatal for the whole request.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Steam installation not found")]
    SteamNotFound,

    #[error("Invalid App ID '{0}': expected digits only")]
    InvalidAppId(String),

    #[error("Game with AppID {0} not found in any Steam library")]
    GameNotFound(String),

    #[error("Could not find game executable in {}", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error(
        "AppID {0} has no entry in any Steam user config. Launch the game once through Steam, then try again"
    )]
    NoLaunchConfigBlock(String),
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Dependency not found: {0}")]
    DependencyMissing(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not update {}: {reason}", file.display())]
    ConfigMutation { file: PathBuf, reason: String },

    #[error("{0}")]
    Tool(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

impl From<reqwest::Error> for PatchError {
    fn from(e: reqwest::Error) -> Self {
        PatchError::Network(e.to_string())
    }
}

impl From<walkdir::Error> for PatchError {
    fn from(e: walkdir::Error) -> Self {
        PatchError::Io(e.into())
    }
}

impl PatchError {
    pub fn config_mutation(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PatchError::ConfigMutation {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Only resolution failures abort a request; everything else is reported per component.
    pub fn is_fatal_to_request(&self) -> bool {
        matches!(self, PatchError::Resolution(_))
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
