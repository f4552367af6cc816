//! Steam client process control
//!
//! The client rewrites `localconfig.vdf` whenever it likes, so it has to be down while
//! we edit that file.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use sysinfo::System;
use tracing::{info, warn};

use crate::error::{PatchError, Result};

/// What the launch-config editor needs from the running client
pub trait LauncherControl {
    fn is_running(&self) -> bool;

    /// Ask every matching process to exit. Returns true if at least one was signalled.
    fn terminate(&self) -> bool;

    /// Start the client again, detached from us
    fn restart(&self) -> Result<()>;
}

/// The real Steam client on this machine
pub struct SteamProcess {
    pub launcher_exe: PathBuf,
    /// Process names to match, compared case-insensitively
    pub process_names: Vec<String>,
}

impl SteamProcess {
    pub fn new(launcher_exe: PathBuf) -> Self {
        let process_names = if cfg!(windows) {
            vec!["steam.exe".to_string()]
        } else {
            vec!["steam".to_string()]
        };
        Self {
            launcher_exe,
            process_names,
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.process_names
            .iter()
            .any(|wanted| wanted.eq_ignore_ascii_case(name))
    }
}

impl LauncherControl for SteamProcess {
    fn is_running(&self) -> bool {
        let sys = System::new_all();
        sys.processes()
            .values()
            .any(|p| self.matches(&p.name().to_string_lossy()))
    }

    fn terminate(&self) -> bool {
        let sys = System::new_all();
        let mut signalled = false;
        for process in sys.processes().values() {
            if self.matches(&process.name().to_string_lossy()) {
                info!("Stopping Steam (pid {})", process.pid());
                if process.kill() {
                    signalled = true;
                } else {
                    warn!("Could not signal Steam process {}", process.pid());
                }
            }
        }
        signalled
    }

    fn restart(&self) -> Result<()> {
        let mut cmd = Command::new(&self.launcher_exe);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            cmd.creation_flags(DETACHED_PROCESS);
        }

        cmd.spawn().map_err(|e| {
            PatchError::Tool(format!(
                "Failed to restart Steam ({}): {}",
                self.launcher_exe.display(),
                e
            ))
        })?;
        info!("Restarted Steam");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_match_ignores_case() {
        let steam = SteamProcess {
            launcher_exe: PathBuf::from("steam.exe"),
            process_names: vec!["steam.exe".to_string()],
        };
        assert!(steam.matches("Steam.exe"));
        assert!(!steam.matches("steamwebhelper.exe"));
    }

    #[test]
    fn test_restart_missing_binary_is_tool_error() {
        let steam = SteamProcess::new(PathBuf::from("/nonexistent/steam.sh"));
        assert!(matches!(steam.restart(), Err(PatchError::Tool(_))));
    }
}
