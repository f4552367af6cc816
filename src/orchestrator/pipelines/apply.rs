//! Apply pipeline
//!
//! Order: Steamless, online fix, Goldberg, launch options, record. A failed stage is
//! reported and later stages still run; nothing already done is rolled back.

use tracing::{error, info, warn};

use super::super::types::{ApplyRequest, ApplyResponse};
use super::super::Patcher;
use super::locate::resolve_target;
use crate::error::Result;
use crate::installer::unsteam::{launch_command, loader_path, PlayerIdentity};
use crate::installer::{ComponentReport, InstallTarget, Installer};
use crate::launch_config::set_launch_override;
use crate::state::{load_state, save_state, Component, ComponentFlags, PatchState};

/// Run one installer, turning its outcome into a report
fn run(
    installer: &dyn Installer,
    target: &InstallTarget,
    applied: &mut ComponentFlags,
    stage_errors: &mut Vec<String>,
    fatal: bool,
) -> (ComponentReport, Vec<String>) {
    let component = installer.component();
    info!("Applying {}", component);
    match installer.apply(target) {
        Ok(done) => {
            info!("{}", done.message);
            applied.set(component, true);
            (ComponentReport::ok(done.message), done.installed_files)
        }
        Err(e) => {
            if fatal {
                error!("{} failed: {}", component, e);
                stage_errors.push(format!("{} failed: {}", component, e));
            } else {
                warn!("{} skipped: {}", component, e);
            }
            (ComponentReport::failed(&e), Vec::new())
        }
    }
}

fn try_apply(patcher: &Patcher, req: &ApplyRequest) -> Result<ApplyResponse> {
    let target = resolve_target(patcher, &req.app_id)?;
    let mut resp = ApplyResponse {
        success: true,
        game_folder: Some(target.install_dir.clone()),
        game_exe: Some(target.exe.clone()),
        ..Default::default()
    };

    let mut applied = ComponentFlags::default();
    let mut stage_errors = Vec::new();
    let mut unsteam_files = Vec::new();
    let mut steamless_exe = None;

    if req.steamless_enabled {
        let installer = patcher.installers.steamless();
        let (report, files) =
            run(installer.as_ref(), &target, &mut applied, &mut stage_errors, false);
        resp.steamless = Some(report);
        steamless_exe = files.into_iter().next();
    }

    if req.unsteam_enabled {
        let identity = PlayerIdentity {
            steam_id: req.steam_id.clone(),
            player_name: req.username.clone(),
        };
        let installer = patcher.installers.unsteam(identity);
        let (report, files) =
            run(installer.as_ref(), &target, &mut applied, &mut stage_errors, true);
        resp.unsteam = Some(report);
        unsteam_files = files;
    }

    if req.goldberg_enabled {
        let mut options = req
            .goldberg_options
            .clone()
            .unwrap_or_else(|| patcher.cfg.goldberg.clone());
        if options.steam_api_key.is_none() && !patcher.cfg.steam_web_api_key.is_empty() {
            options.steam_api_key = Some(patcher.cfg.steam_web_api_key.clone());
        }
        let installer = patcher.installers.goldberg(options);
        let (report, _) = run(installer.as_ref(), &target, &mut applied, &mut stage_errors, true);
        resp.goldberg = Some(report);
    }

    if applied.unsteam {
        let command = launch_command(&loader_path(&target));
        match set_launch_override(
            &patcher.steam,
            &target.app_id,
            &command,
            patcher.launcher.as_ref(),
            &patcher.cfg.launcher,
        ) {
            Ok(report) => resp.launch_options = Some(report),
            Err(e) => {
                error!("Launch options not set: {}", e);
                stage_errors.push(format!("Launch options: {}", e));
            }
        }
    }

    if let Err(e) = record(&target, applied, steamless_exe, unsteam_files) {
        error!("Could not save patch state: {}", e);
        stage_errors.push(format!("Patch state: {}", e));
    }

    if !stage_errors.is_empty() {
        resp.success = false;
        resp.error = Some(stage_errors.join("; "));
    }
    Ok(resp)
}

/// Merge what this run applied into the game's record
fn record(
    target: &InstallTarget,
    applied: ComponentFlags,
    steamless_exe: Option<String>,
    unsteam_files: Vec<String>,
) -> Result<()> {
    if !applied.any() {
        return Ok(());
    }

    let mut state =
        load_state(&target.install_dir).unwrap_or_else(|| PatchState::new(&target.app_id, applied));
    let mut flags = state.flags();
    for component in Component::ALL {
        if applied.get(component) {
            flags.set(component, true);
        }
    }
    state.set_flags(flags);
    if applied.steamless && steamless_exe.is_some() {
        state.steamless_exe = steamless_exe;
    }
    if applied.unsteam {
        // A repeat apply sees its earlier files as pre-existing; keep them recorded
        for file in unsteam_files {
            if !state.unsteam_files.contains(&file) {
                state.unsteam_files.push(file);
            }
        }
    }
    save_state(&target.install_dir, &state)
}

/// Apply the requested components to one game. Resolution failures come back as a
/// response with only `error` set.
pub fn apply_fix(patcher: &Patcher, req: &ApplyRequest) -> ApplyResponse {
    info!("Apply request for AppID {}", req.app_id);
    try_apply(patcher, req).unwrap_or_else(|e| {
        error!("{}", e);
        ApplyResponse::failed(&e)
    })
}
