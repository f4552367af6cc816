//! Editing every profile's localconfig.vdf with Steam stopped

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use super::super::types::LaunchConfigReport;
use super::wait::{wait_for_exit, wait_for_stable};
use crate::config::LauncherTimings;
use crate::steam::LauncherControl;
use crate::vdf::VdfError;

/// Stop Steam, wait for it to exit and its files to settle, apply `edit` to every file
/// in `configs`, then start Steam again if it was us who stopped it.
///
/// `edit` returns the new content, or `None` to leave a file alone. If Steam is still
/// running when the exit wait runs out, no file is touched and every profile is
/// reported as failed, since Steam rewrites localconfig.vdf when it shuts down.
pub fn edit_profiles(
    configs: &[PathBuf],
    control: &dyn LauncherControl,
    timings: &LauncherTimings,
    edit: impl Fn(&str) -> Result<Option<String>, VdfError>,
) -> LaunchConfigReport {
    let mut report = LaunchConfigReport::default();

    let was_running = control.is_running();
    let mut stopped = false;
    if was_running {
        stopped = control.terminate();
        if stopped {
            info!("Stopped Steam to edit launch options");
        } else {
            warn!("Could not stop Steam, waiting for it to exit");
        }
        if !wait_for_exit(control, timings) {
            for path in configs {
                report
                    .failed
                    .push(format!("{}: Steam is still running", path.display()));
            }
            return report;
        }
    }
    wait_for_stable(configs, timings);

    for path in configs {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                report.failed.push(format!("{}: {}", path.display(), e));
                continue;
            }
        };

        match edit(&content) {
            Ok(Some(updated)) => match fs::write(path, updated) {
                Ok(()) => {
                    info!("Updated {}", path.display());
                    report.modified += 1;
                }
                Err(e) => {
                    warn!("Could not write {}: {}", path.display(), e);
                    report.failed.push(format!("{}: {}", path.display(), e));
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!("Could not parse {}: {}", path.display(), e);
                report.failed.push(format!("{}: {}", path.display(), e));
            }
        }
    }

    if stopped {
        match control.restart() {
            Ok(()) => report.restarted = true,
            Err(e) => warn!("{}", e),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Never exits and refuses to be stopped
    struct Stubborn {
        polls: Cell<u32>,
        restarts: Cell<u32>,
    }

    impl LauncherControl for Stubborn {
        fn is_running(&self) -> bool {
            self.polls.set(self.polls.get() + 1);
            true
        }

        fn terminate(&self) -> bool {
            false
        }

        fn restart(&self) -> crate::error::Result<()> {
            self.restarts.set(self.restarts.get() + 1);
            Ok(())
        }
    }

    /// Exits on its own a few polls after a failed terminate
    struct SlowToExit {
        polls: Cell<u32>,
        restarts: Cell<u32>,
    }

    impl LauncherControl for SlowToExit {
        fn is_running(&self) -> bool {
            let n = self.polls.get();
            self.polls.set(n + 1);
            n < 3
        }

        fn terminate(&self) -> bool {
            false
        }

        fn restart(&self) -> crate::error::Result<()> {
            self.restarts.set(self.restarts.get() + 1);
            Ok(())
        }
    }

    fn short() -> LauncherTimings {
        LauncherTimings {
            poll_interval_ms: 1,
            exit_timeout_ms: 20,
            settle_ms: 1,
            stability_timeout_ms: 100,
        }
    }

    fn always_edit(content: &str) -> Result<Option<String>, VdfError> {
        Ok(Some(format!("{}edited", content)))
    }

    #[test]
    fn test_no_edit_while_steam_keeps_running() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("localconfig.vdf");
        fs::write(&config, "original").unwrap();
        let control = Stubborn {
            polls: Cell::new(0),
            restarts: Cell::new(0),
        };

        let report = edit_profiles(&[config.clone()], &control, &short(), always_edit);

        assert_eq!(report.modified, 0);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].contains("still running"));
        assert!(!report.restarted);
        assert_eq!(control.restarts.get(), 0);
        assert!(control.polls.get() > 1);
        assert_eq!(fs::read_to_string(&config).unwrap(), "original");
    }

    #[test]
    fn test_failed_terminate_still_waits_for_exit() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("localconfig.vdf");
        fs::write(&config, "original").unwrap();
        let control = SlowToExit {
            polls: Cell::new(0),
            restarts: Cell::new(0),
        };

        let report = edit_profiles(&[config.clone()], &control, &short(), always_edit);

        assert_eq!(report.modified, 1);
        assert!(report.failed.is_empty());
        // Steam went away on its own, so it is not ours to start again
        assert!(!report.restarted);
        assert_eq!(control.restarts.get(), 0);
        assert!(control.polls.get() >= 4);
        assert_eq!(fs::read_to_string(&config).unwrap(), "originaledited");
    }
}
