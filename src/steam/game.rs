//! Steam game lookup by AppID
//!
//! Each library keeps `steamapps/appmanifest_<appid>.acf` per installed game. The
//! manifest's `installdir` names the folder under `steamapps/common`.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::ResolutionError;
use crate::vdf;

static INSTALL_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"installdir"\s+"((?:[^"\\]|\\.)*)""#).unwrap());

/// AppIDs are plain decimal numbers
pub fn validate_app_id(app_id: &str) -> Result<(), ResolutionError> {
    if !app_id.is_empty() && app_id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ResolutionError::InvalidAppId(app_id.to_string()))
    }
}

/// Pull `installdir` out of an appmanifest without modelling the rest of the file
pub fn read_install_dir(manifest_content: &str) -> Option<String> {
    INSTALL_DIR
        .captures(manifest_content)
        .and_then(|cap| cap.get(1))
        .map(|m| vdf::unescape(m.as_str()))
        .filter(|dir| !dir.is_empty())
}

/// Find the install folder of `app_id` across `libraries`, in order.
///
/// The first library whose manifest names an install dir decides the answer: if that
/// folder is missing the game counts as not installed, and later libraries are not
/// consulted. A manifest that can't be read or has no `installdir` is skipped and the
/// search moves on to the next library.
pub fn find_game_by_app_id(libraries: &[PathBuf], app_id: &str) -> Option<PathBuf> {
    for library in libraries {
        let steamapps = library.join("steamapps");
        let manifest_path = steamapps.join(format!("appmanifest_{}.acf", app_id));
        if !manifest_path.is_file() {
            continue;
        }

        let content = match fs::read_to_string(&manifest_path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read {}: {}", manifest_path.display(), e);
                continue;
            }
        };

        let Some(install_dir) = read_install_dir(&content) else {
            warn!("{} has no installdir", manifest_path.display());
            continue;
        };

        let game_path = steamapps.join("common").join(&install_dir);
        if game_path.is_dir() {
            info!("AppID {} installed at {}", app_id, game_path.display());
            return Some(game_path);
        }

        debug!(
            "Manifest {} points at missing folder {}",
            manifest_path.display(),
            game_path.display()
        );
        return None;
    }

    None
}
