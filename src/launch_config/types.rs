//! Launch config type definitions

use serde::Serialize;

/// Key Steam stores a game's launch options under
pub const LAUNCH_OPTIONS_KEY: &str = "LaunchOptions";

/// Where per-app settings live inside localconfig.vdf
pub const APPS_PATH: [&str; 5] = ["UserLocalConfigStore", "Software", "Valve", "Steam", "apps"];

/// Outcome of editing every profile's localconfig.vdf
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfigReport {
    /// Profiles whose file was rewritten
    pub modified: usize,
    /// Steam was stopped for the edit and started again
    pub restarted: bool,
    /// Profiles that could not be edited, with the reason
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}
