use crate::installer::goldberg::GoldbergOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GLOBALFIX_URL: &str =
    "https://github.com/ShayneVi/Global-OnlineFix-Unsteam/raw/refs/heads/main/GlobalFix.zip";

/// How long to wait on the Steam client before touching its config files
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LauncherTimings {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Upper bound on waiting for the process to disappear
    #[serde(default = "default_exit_timeout_ms")]
    pub exit_timeout_ms: u64,
    /// Two mtime reads this far apart must match for a file to count as settled
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default = "default_stability_timeout_ms")]
    pub stability_timeout_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_exit_timeout_ms() -> u64 {
    10_000
}

fn default_settle_ms() -> u64 {
    1_000
}

fn default_stability_timeout_ms() -> u64 {
    10_000
}

impl Default for LauncherTimings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            exit_timeout_ms: default_exit_timeout_ms(),
            settle_ms: default_settle_ms(),
            stability_timeout_ms: default_stability_timeout_ms(),
        }
    }
}

impl LauncherTimings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn exit_timeout(&self) -> Duration {
        Duration::from_millis(self.exit_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn stability_timeout(&self) -> Duration {
        Duration::from_millis(self.stability_timeout_ms)
    }

    /// No waiting at all, for tests and for callers that already stopped Steam
    pub fn immediate() -> Self {
        Self {
            poll_interval_ms: 0,
            exit_timeout_ms: 0,
            settle_ms: 0,
            stability_timeout_ms: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GlobalFixConfig {
    /// Steam install root to try before the automatic search (still validated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_path: Option<PathBuf>,

    /// Where the bundled Goldberg/Steamless/7-Zip files live
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources_dir: Option<PathBuf>,

    #[serde(default = "default_globalfix_url")]
    pub globalfix_url: String,

    /// Steam Web API key used for achievement schemas
    #[serde(default)]
    pub steam_web_api_key: String,

    #[serde(default)]
    pub goldberg: GoldbergOptions,

    #[serde(default = "default_executable_search_depth")]
    pub executable_search_depth: usize,

    /// Depth for steam_api/backup/fix-file lookups inside a game folder
    #[serde(default = "default_library_search_depth")]
    pub library_search_depth: usize,

    /// Interpreter to run Steamless.CLI.exe with on hosts that can't run it directly (e.g. "mono")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steamless_runner: Option<String>,

    #[serde(default)]
    pub launcher: LauncherTimings,
}

fn default_globalfix_url() -> String {
    DEFAULT_GLOBALFIX_URL.to_string()
}

fn default_executable_search_depth() -> usize {
    4
}

fn default_library_search_depth() -> usize {
    3
}

impl Default for GlobalFixConfig {
    fn default() -> Self {
        Self {
            steam_path: None,
            resources_dir: None,
            globalfix_url: default_globalfix_url(),
            steam_web_api_key: String::new(),
            goldberg: GoldbergOptions::default(),
            executable_search_depth: default_executable_search_depth(),
            library_search_depth: default_library_search_depth(),
            steamless_runner: None,
            launcher: LauncherTimings::default(),
        }
    }
}
