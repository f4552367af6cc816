//! Patch state type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::util::resolve_relative;

/// The three independent modifications a game folder can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Steamless,
    Unsteam,
    Goldberg,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::Steamless, Component::Unsteam, Component::Goldberg];

    pub fn name(&self) -> &'static str {
        match self {
            Component::Steamless => "steamless",
            Component::Unsteam => "unsteam",
            Component::Goldberg => "goldberg",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One boolean per component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentFlags {
    pub steamless: bool,
    pub unsteam: bool,
    pub goldberg: bool,
}

impl ComponentFlags {
    pub fn get(&self, component: Component) -> bool {
        match component {
            Component::Steamless => self.steamless,
            Component::Unsteam => self.unsteam,
            Component::Goldberg => self.goldberg,
        }
    }

    pub fn set(&mut self, component: Component, value: bool) {
        match component {
            Component::Steamless => self.steamless = value,
            Component::Unsteam => self.unsteam = value,
            Component::Goldberg => self.goldberg = value,
        }
    }

    pub fn any(&self) -> bool {
        self.steamless || self.unsteam || self.goldberg
    }
}

/// Contents of `.globalfix_state.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchState {
    pub app_id: String,
    #[serde(default)]
    pub steamless_enabled: bool,
    #[serde(default)]
    pub unsteam_enabled: bool,
    #[serde(default)]
    pub goldberg_enabled: bool,
    pub timestamp: DateTime<Utc>,
    /// Files the online fix archive dropped next to the executable, relative to it
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unsteam_files: Vec<String>,
    /// The executable Steamless replaced, relative to the install folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steamless_exe: Option<String>,
}

impl PatchState {
    pub fn new(app_id: &str, flags: ComponentFlags) -> Self {
        Self {
            app_id: app_id.to_string(),
            steamless_enabled: flags.steamless,
            unsteam_enabled: flags.unsteam,
            goldberg_enabled: flags.goldberg,
            timestamp: Utc::now(),
            unsteam_files: Vec::new(),
            steamless_exe: None,
        }
    }

    /// Where the recorded Steamless executable lives under `install_dir`
    pub fn steamless_exe_path(&self, install_dir: &Path) -> Option<PathBuf> {
        self.steamless_exe
            .as_deref()
            .and_then(|rel| resolve_relative(install_dir, rel))
    }

    pub fn flags(&self) -> ComponentFlags {
        ComponentFlags {
            steamless: self.steamless_enabled,
            unsteam: self.unsteam_enabled,
            goldberg: self.goldberg_enabled,
        }
    }

    pub fn set_flags(&mut self, flags: ComponentFlags) {
        self.steamless_enabled = flags.steamless;
        self.unsteam_enabled = flags.unsteam;
        self.goldberg_enabled = flags.goldberg;
        self.timestamp = Utc::now();
    }
}

/// The two signals available for one component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentEvidence {
    /// The state file says it was applied
    pub declared_applied: bool,
    /// A backup (or, for the online fix, its config file) is on disk
    pub backup_exists: bool,
}

/// What the two signals add up to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Evidence {
    /// Both agree it is applied
    Confirmed,
    /// On disk but missing from (or denied by) the state file
    BackupOnly,
    /// Recorded but nothing on disk backs it up
    DeclaredOnly,
    Absent,
}

impl Evidence {
    /// Whether removal should treat the component as applied by default
    pub fn is_applied(&self) -> bool {
        !matches!(self, Evidence::Absent)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchEvidence {
    pub steamless: ComponentEvidence,
    pub unsteam: ComponentEvidence,
    pub goldberg: ComponentEvidence,
}

impl PatchEvidence {
    pub fn get(&self, component: Component) -> ComponentEvidence {
        match component {
            Component::Steamless => self.steamless,
            Component::Unsteam => self.unsteam,
            Component::Goldberg => self.goldberg,
        }
    }
}
