//! Remove pipeline
//!
//! Without an explicit selection, whatever the record or the backups say is applied
//! gets removed. The record is rewritten from what is still on disk afterwards.

use tracing::{error, info, warn};

use super::super::types::{RemoveRequest, RemoveResponse};
use super::super::Patcher;
use super::locate::resolve_target;
use crate::error::Result;
use crate::installer::{InstallTarget, Installer};
use crate::launch_config::clear_launch_override;
use crate::state::{
    delete_state, gather_evidence, load_state, removal_defaults, save_state, Component,
    ComponentFlags, PatchState,
};

fn selection(req: &RemoveRequest, defaults: ComponentFlags) -> ComponentFlags {
    ComponentFlags {
        steamless: req.remove_steamless.unwrap_or(defaults.steamless),
        unsteam: req.remove_unsteam.unwrap_or(defaults.unsteam),
        goldberg: req.remove_goldberg.unwrap_or(defaults.goldberg),
    }
}

fn try_remove(patcher: &Patcher, req: &RemoveRequest) -> Result<RemoveResponse> {
    let target = resolve_target(patcher, &req.app_id)?;
    let prior = load_state(&target.install_dir);
    let before = gather_evidence(
        &target.install_dir,
        prior.as_ref(),
        Some(&target.exe),
        target.search_depth,
    );
    let applied = removal_defaults(&before);
    let selected = selection(req, applied);
    info!(
        "Removing from {}: steamless={} unsteam={} goldberg={}",
        target.install_dir.display(),
        selected.steamless,
        selected.unsteam,
        selected.goldberg
    );

    let mut resp = RemoveResponse {
        game_folder: Some(target.install_dir.clone()),
        ..Default::default()
    };
    let mut removed = ComponentFlags::default();

    // Fix files first: the loader must be gone before its launch option
    if selected.unsteam {
        let installer = patcher.installers.unsteam(Default::default());
        undo(installer.as_ref(), &target, prior.as_ref(), &mut removed, &mut resp);

        let report = clear_launch_override(
            &patcher.steam,
            &target.app_id,
            patcher.launcher.as_ref(),
            &patcher.cfg.launcher,
        );
        if report.modified > 0 {
            resp.removed_items.push(format!(
                "Cleared launch options in {} profile(s)",
                report.modified
            ));
        }
        for failure in report.failed {
            resp.errors.push(format!("Launch options: {}", failure));
        }
    }

    if selected.goldberg {
        let installer = patcher.installers.goldberg(Default::default());
        undo(installer.as_ref(), &target, prior.as_ref(), &mut removed, &mut resp);
    }

    if selected.steamless {
        let installer = patcher.installers.steamless();
        undo(installer.as_ref(), &target, prior.as_ref(), &mut removed, &mut resp);
    }

    if let Err(e) = update_record(&target, prior, applied, removed) {
        error!("Could not update patch state: {}", e);
        resp.errors.push(format!("Patch state: {}", e));
    }

    resp.success = resp.errors.is_empty();
    Ok(resp)
}

fn undo(
    installer: &dyn Installer,
    target: &InstallTarget,
    state: Option<&PatchState>,
    removed: &mut ComponentFlags,
    resp: &mut RemoveResponse,
) {
    let component = installer.component();
    match installer.remove(target, state) {
        Ok(items) => {
            info!("Removed {} ({} item(s))", component, items.len());
            removed.set(component, true);
            resp.removed_items.extend(items);
        }
        Err(e) => {
            error!("Could not remove {}: {}", component, e);
            resp.errors.push(format!("{}: {}", component, e));
        }
    }
}

/// A component stays recorded if it was applied and not removed, or if its on-disk
/// evidence survived the removal
fn update_record(
    target: &InstallTarget,
    prior: Option<PatchState>,
    applied: ComponentFlags,
    removed: ComponentFlags,
) -> Result<()> {
    let after = gather_evidence(
        &target.install_dir,
        prior.as_ref(),
        Some(&target.exe),
        target.search_depth,
    );
    let mut remaining = ComponentFlags::default();
    for component in Component::ALL {
        let still_there = applied.get(component) && !removed.get(component);
        remaining.set(component, still_there || after.get(component).backup_exists);
    }

    if !remaining.any() {
        info!("Nothing left applied, deleting patch state");
        return delete_state(&target.install_dir);
    }

    warn!(
        "Still applied after removal: steamless={} unsteam={} goldberg={}",
        remaining.steamless, remaining.unsteam, remaining.goldberg
    );
    let mut state = prior.unwrap_or_else(|| PatchState::new(&target.app_id, remaining));
    state.set_flags(remaining);
    if !remaining.unsteam {
        state.unsteam_files.clear();
    }
    if !remaining.steamless {
        state.steamless_exe = None;
    }
    save_state(&target.install_dir, &state)
}

/// Undo the selected components on one game. Resolution failures come back as a
/// response with a single error.
pub fn remove_fix(patcher: &Patcher, req: &RemoveRequest) -> RemoveResponse {
    info!("Remove request for AppID {}", req.app_id);
    try_remove(patcher, req).unwrap_or_else(|e| {
        error!("{}", e);
        RemoveResponse::failed(&e)
    })
}
