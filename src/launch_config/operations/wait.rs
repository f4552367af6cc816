//! Waiting for Steam to let go of its config files
//!
//! Both waits are bounded and report whether they saw what they waited for. An exit
//! timeout stops the edit; a stability timeout only logs a warning.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Instant, SystemTime};

use tracing::{debug, warn};

use crate::config::LauncherTimings;
use crate::steam::LauncherControl;

/// Poll until the client process is gone. Returns false on timeout.
pub fn wait_for_exit(control: &dyn LauncherControl, timings: &LauncherTimings) -> bool {
    let deadline = Instant::now() + timings.exit_timeout();
    loop {
        if !control.is_running() {
            debug!("Steam has exited");
            return true;
        }
        if Instant::now() >= deadline {
            warn!("Steam still running after {:?}", timings.exit_timeout());
            return false;
        }
        thread::sleep(timings.poll_interval());
    }
}

fn mtimes(files: &[PathBuf]) -> Vec<Option<SystemTime>> {
    files
        .iter()
        .map(|f| fs::metadata(f).and_then(|m| m.modified()).ok())
        .collect()
}

/// Wait until no file in `files` changes its modification time across one settle
/// interval. Returns false on timeout.
pub fn wait_for_stable(files: &[PathBuf], timings: &LauncherTimings) -> bool {
    let deadline = Instant::now() + timings.stability_timeout();
    let mut previous = mtimes(files);
    loop {
        thread::sleep(timings.settle());
        let current = mtimes(files);
        if current == previous {
            return true;
        }
        if Instant::now() >= deadline {
            warn!("Steam config files still changing, continuing anyway");
            return false;
        }
        previous = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs::File;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    /// Reports running for the first `polls` checks
    struct ExitsAfter {
        polls: Cell<u32>,
    }

    impl LauncherControl for ExitsAfter {
        fn is_running(&self) -> bool {
            let left = self.polls.get();
            if left == 0 {
                return false;
            }
            self.polls.set(left - 1);
            true
        }

        fn terminate(&self) -> bool {
            true
        }

        fn restart(&self) -> crate::error::Result<()> {
            Ok(())
        }
    }

    fn fast() -> LauncherTimings {
        LauncherTimings {
            poll_interval_ms: 1,
            exit_timeout_ms: 1_000,
            settle_ms: 1,
            stability_timeout_ms: 1_000,
        }
    }

    #[test]
    fn test_exit_observed() {
        let control = ExitsAfter { polls: Cell::new(3) };
        assert!(wait_for_exit(&control, &fast()));
        assert_eq!(control.polls.get(), 0);
    }

    #[test]
    fn test_exit_timeout_gives_up() {
        let control = ExitsAfter {
            polls: Cell::new(u32::MAX),
        };
        assert!(!wait_for_exit(&control, &LauncherTimings::immediate()));
    }

    #[test]
    fn test_untouched_files_are_stable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("localconfig.vdf");
        fs::write(&file, "x").unwrap();
        let missing = dir.path().join("missing.vdf");
        assert!(wait_for_stable(&[file, missing], &fast()));
    }

    #[test]
    fn test_exit_gives_up_after_timeout() {
        let control = ExitsAfter {
            polls: Cell::new(u32::MAX),
        };
        let timings = LauncherTimings {
            poll_interval_ms: 1,
            exit_timeout_ms: 30,
            settle_ms: 1,
            stability_timeout_ms: 1_000,
        };

        let started = Instant::now();
        assert!(!wait_for_exit(&control, &timings));
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(30));
        assert!(elapsed < Duration::from_secs(5));
        assert!(u32::MAX - control.polls.get() > 1);
    }

    #[test]
    fn test_stable_gives_up_while_file_keeps_changing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("localconfig.vdf");
        fs::write(&path, "x").unwrap();

        let stop = Arc::new(AtomicBool::new(false));
        let writer = {
            let stop = Arc::clone(&stop);
            let path = path.clone();
            thread::spawn(move || {
                let base = SystemTime::now();
                let mut step = 0u64;
                while !stop.load(Ordering::Relaxed) {
                    step += 1;
                    let file = File::options().write(true).open(&path).unwrap();
                    file.set_modified(base + Duration::from_secs(step)).unwrap();
                    thread::sleep(Duration::from_millis(2));
                }
            })
        };

        let timings = LauncherTimings {
            poll_interval_ms: 1,
            exit_timeout_ms: 1_000,
            settle_ms: 20,
            stability_timeout_ms: 100,
        };
        let started = Instant::now();
        let stable = wait_for_stable(&[path], &timings);
        let elapsed = started.elapsed();

        stop.store(true, Ordering::Relaxed);
        writer.join().unwrap();

        assert!(!stable);
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_secs(5));
    }
}
