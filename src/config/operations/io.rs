use crate::config::types::GlobalFixConfig;
use crate::error::Result;
use crate::paths::PATH_DATA;

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

pub fn load_cfg() -> GlobalFixConfig {
    load_cfg_from(&PATH_DATA.join("settings.json"))
}

/// Read settings from `path`, falling back to defaults if the file is missing or invalid
pub fn load_cfg_from(path: &Path) -> GlobalFixConfig {
    if let Ok(file) = File::open(path) {
        match serde_json::from_reader::<_, GlobalFixConfig>(BufReader::new(file)) {
            Ok(config) => return config,
            Err(e) => warn!("Ignoring unreadable {}: {}", path.display(), e),
        }
    }

    GlobalFixConfig::default()
}

pub fn save_cfg(config: &GlobalFixConfig) -> Result<()> {
    save_cfg_to(config, &PATH_DATA.join("settings.json"))
}

pub fn save_cfg_to(config: &GlobalFixConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
