//! Target resolution and the read-only status report

use std::path::PathBuf;

use tracing::info;

use super::super::types::{ComponentStatus, GameStatus, LocateResponse};
use super::super::Patcher;
use crate::error::{ResolutionError, Result};
use crate::installer::InstallTarget;
use crate::state::{gather_evidence, load_state, reconcile, ComponentEvidence};
use crate::steam::{find_game_by_app_id, find_primary_executable, validate_app_id};

fn resolve_game_dir(patcher: &Patcher, app_id: &str) -> Result<PathBuf> {
    validate_app_id(app_id)?;
    let libraries = patcher.steam.library_roots();
    find_game_by_app_id(&libraries, app_id)
        .ok_or_else(|| ResolutionError::GameNotFound(app_id.to_string()).into())
}

/// Game folder and primary executable for `app_id`. Every failure here is fatal.
pub fn resolve_target(patcher: &Patcher, app_id: &str) -> Result<InstallTarget> {
    let install_dir = resolve_game_dir(patcher, app_id)?;
    let exe = find_primary_executable(&install_dir, patcher.cfg.executable_search_depth)
        .ok_or_else(|| ResolutionError::ExecutableNotFound(install_dir.clone()))?;
    info!("Primary executable: {}", exe.display());

    Ok(InstallTarget {
        app_id: app_id.to_string(),
        install_dir,
        exe,
        search_depth: patcher.cfg.library_search_depth,
    })
}

fn status(evidence: ComponentEvidence) -> ComponentStatus {
    ComponentStatus {
        declared_applied: evidence.declared_applied,
        backup_exists: evidence.backup_exists,
        evidence: reconcile(evidence),
    }
}

/// Steam install root and libraries, plus the game's folder and patch status when an
/// AppID is given. A missing executable is reported, not an error.
pub fn locate(patcher: &Patcher, app_id: Option<&str>) -> LocateResponse {
    let mut resp = LocateResponse {
        success: true,
        install_root: Some(patcher.steam.root.clone()),
        libraries: patcher.steam.library_roots(),
        ..Default::default()
    };

    let Some(app_id) = app_id else {
        return resp;
    };

    match resolve_game_dir(patcher, app_id) {
        Ok(game_folder) => {
            let game_exe =
                find_primary_executable(&game_folder, patcher.cfg.executable_search_depth);
            let state = load_state(&game_folder);
            let evidence = gather_evidence(
                &game_folder,
                state.as_ref(),
                game_exe.as_deref(),
                patcher.cfg.library_search_depth,
            );
            resp.game = Some(GameStatus {
                app_id: app_id.to_string(),
                game_folder,
                game_exe,
                steamless: status(evidence.steamless),
                unsteam: status(evidence.unsteam),
                goldberg: status(evidence.goldberg),
            });
        }
        Err(e) => {
            resp.success = false;
            resp.error = Some(e.to_string());
        }
    }
    resp
}
