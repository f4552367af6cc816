//! Achievement schema download
//!
//! Nothing here is allowed to fail the Goldberg install: every problem is logged and
//! the game simply ends up with fewer (or no) achievements.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use super::super::pure::{build_manifest, icon_file_names};
use super::super::types::SchemaAchievement;
use crate::error::{PatchError, Result};

/// Where achievement metadata and icons come from
pub trait AchievementSource {
    fn schema(&self, app_id: &str, key: &str) -> Result<Vec<SchemaAchievement>>;

    fn image(&self, url: &str) -> Result<Vec<u8>>;
}

/// Steam Web API (`ISteamUserStats/GetSchemaForGame/v2`)
pub struct SteamWebApi {
    pub base_url: String,
}

impl Default for SteamWebApi {
    fn default() -> Self {
        Self {
            base_url: "https://api.steampowered.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SchemaResponse {
    #[serde(default)]
    game: Option<SchemaGame>,
}

#[derive(Debug, Deserialize)]
struct SchemaGame {
    #[serde(rename = "availableGameStats", default)]
    available_game_stats: Option<GameStats>,
}

#[derive(Debug, Deserialize)]
struct GameStats {
    #[serde(default)]
    achievements: Vec<SchemaAchievement>,
}

fn parse_schema(body: &str) -> Result<Vec<SchemaAchievement>> {
    let response: SchemaResponse = serde_json::from_str(body)?;
    Ok(response
        .game
        .and_then(|g| g.available_game_stats)
        .map(|s| s.achievements)
        .unwrap_or_default())
}

fn client() -> Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?)
}

impl AchievementSource for SteamWebApi {
    fn schema(&self, app_id: &str, key: &str) -> Result<Vec<SchemaAchievement>> {
        let url = format!("{}/ISteamUserStats/GetSchemaForGame/v2/", self.base_url);
        let response = client()?
            .get(&url)
            .query(&[("key", key), ("appid", app_id)])
            .send()?;
        if !response.status().is_success() {
            return Err(PatchError::Network(format!(
                "Achievement schema request failed: HTTP {}",
                response.status()
            )));
        }
        parse_schema(&response.text()?)
    }

    fn image(&self, url: &str) -> Result<Vec<u8>> {
        let response = client()?.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

fn write_greyscale(color: &[u8], dest: &Path) -> Result<()> {
    let img = image::load_from_memory(color)
        .map_err(|e| PatchError::Tool(format!("Could not decode icon: {}", e)))?;
    img.grayscale()
        .save_with_format(dest, image::ImageFormat::Jpeg)
        .map_err(|e| PatchError::Tool(format!("Could not write {}: {}", dest.display(), e)))
}

/// Download icons for one achievement into `saved` (by their `images/` name). A missing
/// grey icon is derived from the color one.
fn save_icons(
    settings_dir: &Path,
    entry: &SchemaAchievement,
    source: &dyn AchievementSource,
    saved: &mut HashSet<String>,
) {
    let (icon_name, gray_name) = icon_file_names(&entry.name);

    let color = source.image(&entry.icon).and_then(|bytes| {
        fs::write(settings_dir.join(&icon_name), &bytes)?;
        Ok(bytes)
    });
    let color = match color {
        Ok(bytes) => {
            saved.insert(icon_name);
            Some(bytes)
        }
        Err(e) => {
            warn!("Icon for {} not saved: {}", entry.name, e);
            None
        }
    };

    let gray_path = settings_dir.join(&gray_name);
    let gray = if !entry.icongray.is_empty() {
        source
            .image(&entry.icongray)
            .and_then(|bytes| Ok(fs::write(&gray_path, bytes)?))
    } else if let Some(color) = &color {
        write_greyscale(color, &gray_path)
    } else {
        Err(PatchError::Tool("no icon to derive a grey one from".to_string()))
    };
    match gray {
        Ok(()) => {
            saved.insert(gray_name);
        }
        Err(e) => warn!("Grey icon for {} not saved: {}", entry.name, e),
    }
}

/// Fetch the schema for `app_id` and write `achievements.json` (plus `images/` when
/// `with_images`). Returns how many achievements were written; 0 on any failure.
pub fn write_achievements(
    settings_dir: &Path,
    app_id: &str,
    key: &str,
    source: &dyn AchievementSource,
    with_images: bool,
) -> usize {
    let schema = match source.schema(app_id, key) {
        Ok(schema) => schema,
        Err(e) => {
            warn!("Skipping achievements for {}: {}", app_id, e);
            return 0;
        }
    };
    if schema.is_empty() {
        info!("AppID {} has no achievements", app_id);
        return 0;
    }

    let mut saved = HashSet::new();
    if with_images {
        match fs::create_dir_all(settings_dir.join("images")) {
            Ok(()) => {
                for entry in &schema {
                    save_icons(settings_dir, entry, source, &mut saved);
                }
            }
            Err(e) => warn!("Could not create images folder: {}", e),
        }
    }

    let manifest = build_manifest(&schema, with_images.then_some(&saved));
    let written = serde_json::to_string_pretty(&manifest)
        .map_err(PatchError::from)
        .and_then(|json| Ok(fs::write(settings_dir.join("achievements.json"), json)?));
    match written {
        Ok(()) => {
            info!("Wrote {} achievements", manifest.len());
            manifest.len()
        }
        Err(e) => {
            warn!("Could not write achievements.json: {}", e);
            0
        }
    }
}
