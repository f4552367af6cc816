//! Request and response shapes
//!
//! These are what the command line prints and what a front end would exchange, so
//! field names are camelCase.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::PatchError;
use crate::installer::{ComponentReport, GoldbergOptions};
use crate::launch_config::LaunchConfigReport;
use crate::state::Evidence;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub app_id: String,
    #[serde(default = "default_true")]
    pub unsteam_enabled: bool,
    #[serde(default)]
    pub goldberg_enabled: bool,
    /// Falls back to the options saved in settings.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goldberg_options: Option<GoldbergOptions>,
    #[serde(default)]
    pub steamless_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ApplyRequest {
    /// Online fix only, the usual request
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            unsteam_enabled: true,
            goldberg_enabled: false,
            goldberg_options: None,
            steamless_enabled: false,
            steam_id: None,
            username: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_folder: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_exe: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steamless: Option<ComponentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsteam: Option<ComponentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goldberg: Option<ComponentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_options: Option<LaunchConfigReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApplyResponse {
    pub fn failed(error: &PatchError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}

/// `None` means "whatever the state file and backups say is applied"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub app_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_unsteam: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_goldberg: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_steamless: Option<bool>,
}

impl RemoveRequest {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_folder: Option<PathBuf>,
    pub removed_items: Vec<String>,
    pub errors: Vec<String>,
}

impl RemoveResponse {
    pub fn failed(error: &PatchError) -> Self {
        Self {
            success: false,
            errors: vec![error.to_string()],
            ..Default::default()
        }
    }
}

/// Reconciled view of one component
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatus {
    pub declared_applied: bool,
    pub backup_exists: bool,
    pub evidence: Evidence,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub app_id: String,
    pub game_folder: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_exe: Option<PathBuf>,
    pub steamless: ComponentStatus,
    pub unsteam: ComponentStatus,
    pub goldberg: ComponentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_root: Option<PathBuf>,
    pub libraries: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_request_defaults() {
        let req: ApplyRequest = serde_json::from_str(r#"{"appId":"337320"}"#).unwrap();
        assert_eq!(req, ApplyRequest::new("337320"));
    }

    #[test]
    fn test_apply_request_full_shape() {
        let req: ApplyRequest = serde_json::from_str(
            r#"{"appId":"570","unsteamEnabled":false,"goldbergEnabled":true,
                "goldbergOptions":{"accountName":"P1","listenPort":47600},
                "steamlessEnabled":true,"steamId":"7656","username":"P1"}"#,
        )
        .unwrap();
        assert!(!req.unsteam_enabled && req.goldberg_enabled && req.steamless_enabled);
        assert_eq!(req.goldberg_options.unwrap().listen_port, 47600);
        assert_eq!(req.username.as_deref(), Some("P1"));
    }

    #[test]
    fn test_remove_response_shape() {
        let json = serde_json::to_value(RemoveResponse {
            success: true,
            game_folder: Some(PathBuf::from("/g")),
            removed_items: vec!["Removed /g/unsteam.ini".into()],
            errors: Vec::new(),
        })
        .unwrap();
        assert_eq!(json["gameFolder"], "/g");
        assert_eq!(json["removedItems"][0], "Removed /g/unsteam.ini");
        assert!(json["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_failed_apply_response_has_only_error() {
        let err: PatchError = crate::error::ResolutionError::SteamNotFound.into();
        let json = serde_json::to_value(ApplyResponse::failed(&err)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Steam installation not found");
        assert!(json.get("gameFolder").is_none());
    }
}
