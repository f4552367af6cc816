//! Goldberg type definitions

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Emulator settings chosen by the user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GoldbergOptions {
    pub account_name: String,
    pub steam_id: String,
    pub language: String,
    pub listen_port: u16,
    /// Extra peer address for LAN discovery (VPN / virtual LAN setups)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_broadcast_ip: Option<String>,
    pub disable_networking: bool,
    pub offline_mode: bool,
    pub enable_overlay: bool,
    /// Steam Web API key for the achievement schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steam_api_key: Option<String>,
    pub generate_achievement_images: bool,
}

impl Default for GoldbergOptions {
    fn default() -> Self {
        Self {
            account_name: "Goldberg".to_string(),
            steam_id: "76561197960287930".to_string(),
            language: "english".to_string(),
            listen_port: 47584,
            custom_broadcast_ip: None,
            disable_networking: false,
            offline_mode: false,
            enable_overlay: false,
            steam_api_key: None,
            generate_achievement_images: false,
        }
    }
}

/// The game's real Steam API library
#[derive(Debug, Clone, PartialEq)]
pub struct SteamApiLib {
    pub path: PathBuf,
    pub is_64bit: bool,
}

impl SteamApiLib {
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }
}

/// One entry of `ISteamUserStats/GetSchemaForGame`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SchemaAchievement {
    pub name: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hidden: u8,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub icongray: String,
}

/// One entry of `steam_settings/achievements.json`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub hidden: u8,
    pub icon: String,
    pub icongray: String,
}
