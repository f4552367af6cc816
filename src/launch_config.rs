//! Steam launch options - how the online fix gets started
//!
//! The fix loader runs the game itself, so Steam has to launch
//! `"<loader>" %command%` instead of the game. That command lives in each profile's
//! `userdata/<id>/config/localconfig.vdf`, which Steam rewrites on exit; edits only
//! happen with the client stopped.
//!
//! ## Module Structure
//! - `types.rs`: LaunchConfigReport, key constants
//! - `pure/`: span-based edits of a single file
//! - `operations/`: launcher wait logic and the multi-profile edit

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

mod operations;
mod pure;
mod types;

pub use operations::{edit_profiles, wait_for_exit, wait_for_stable};
pub use pure::{clear_launch_options, has_app_block, set_launch_options};
pub use types::{LaunchConfigReport, APPS_PATH, LAUNCH_OPTIONS_KEY};

use crate::config::LauncherTimings;
use crate::error::{PatchError, ResolutionError, Result};
use crate::installer::unsteam::LOADER_MARKER;
use crate::steam::{LauncherControl, SteamInstall};

/// Profiles whose file passes `check`, plus the read/parse failures seen on the way
fn select_profiles(
    configs: Vec<PathBuf>,
    check: impl Fn(&str) -> std::result::Result<bool, crate::vdf::VdfError>,
) -> (Vec<PathBuf>, Vec<String>) {
    let mut selected = Vec::new();
    let mut failed = Vec::new();
    for path in configs {
        let outcome = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| check(&content).map_err(|e| e.to_string()));
        match outcome {
            Ok(true) => selected.push(path),
            Ok(false) => {}
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                failed.push(format!("{}: {}", path.display(), e));
            }
        }
    }
    (selected, failed)
}

/// Point every profile's launch options for `app_id` at `command`.
///
/// Profiles that never launched the game have no block for it and are skipped. If no
/// profile has one, nothing is touched (Steam keeps running) and the error asks the
/// user to launch the game once.
pub fn set_launch_override(
    steam: &SteamInstall,
    app_id: &str,
    command: &str,
    control: &dyn LauncherControl,
    timings: &LauncherTimings,
) -> Result<LaunchConfigReport> {
    let configs = steam.profile_configs();
    let profile_count = configs.len();
    let (targets, failed) = select_profiles(configs, |content| has_app_block(content, app_id));

    if targets.is_empty() {
        if profile_count > 0 && failed.len() == profile_count {
            return Err(PatchError::config_mutation(
                steam.userdata_dir(),
                failed.join("; "),
            ));
        }
        return Err(ResolutionError::NoLaunchConfigBlock(app_id.to_string()).into());
    }

    let mut report = edit_profiles(&targets, control, timings, |content| {
        set_launch_options(content, app_id, command)
    });
    report.failed.extend(failed);

    if report.modified == 0 {
        return Err(if report.failed.is_empty() {
            ResolutionError::NoLaunchConfigBlock(app_id.to_string()).into()
        } else {
            PatchError::config_mutation(steam.userdata_dir(), report.failed.join("; "))
        });
    }

    info!(
        "Launch options for {} set in {} profile(s)",
        app_id, report.modified
    );
    Ok(report)
}

/// Remove our launch option for `app_id` from every profile. Options the user wrote
/// themselves are left alone, and profiles without the app are not an error.
pub fn clear_launch_override(
    steam: &SteamInstall,
    app_id: &str,
    control: &dyn LauncherControl,
    timings: &LauncherTimings,
) -> LaunchConfigReport {
    let (targets, failed) = select_profiles(steam.profile_configs(), |content| {
        clear_launch_options(content, app_id, LOADER_MARKER).map(|out| out.is_some())
    });

    if targets.is_empty() {
        info!("No launch options to clear for {}", app_id);
        return LaunchConfigReport {
            failed,
            ..Default::default()
        };
    }

    let mut report = edit_profiles(&targets, control, timings, |content| {
        clear_launch_options(content, app_id, LOADER_MARKER)
    });
    report.failed.extend(failed);
    report
}
