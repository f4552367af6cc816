//! Steam install root and library resolution

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::GlobalFixConfig;
use crate::error::{ResolutionError, Result};
use crate::paths::PATH_HOME;
use crate::vdf;

/// File whose presence proves a directory really is a Steam install
pub const LAUNCHER_EXE: &str = if cfg!(windows) { "steam.exe" } else { "steam.sh" };

static PATH_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"path"\s+"((?:[^"\\]|\\.)*)""#).unwrap());

/// Ordered candidate sources for the Steam install root.
///
/// Candidates are tried override → authoritative record → drive scan → environment
/// defaults, and the first one containing the launcher executable wins.
#[derive(Debug, Clone, Default)]
pub struct InstallRootSearch {
    /// Explicitly configured path
    pub overrides: Vec<PathBuf>,
    /// The client's own record of where it lives (registry on Windows)
    pub authoritative: Option<PathBuf>,
    /// Drive letters or mount points to combine with `relative_paths`
    pub scan_roots: Vec<PathBuf>,
    pub relative_paths: Vec<PathBuf>,
    pub env_defaults: Vec<PathBuf>,
    pub launcher_exe: String,
}

impl InstallRootSearch {
    /// Search sources for the running host
    pub fn for_host(cfg: &GlobalFixConfig) -> Self {
        let authoritative = match steamlocate::SteamDir::locate() {
            Ok(dir) => Some(dir.path().to_path_buf()),
            Err(e) => {
                debug!("steamlocate found nothing: {}", e);
                None
            }
        };

        let (scan_roots, relative_paths, env_defaults) = if cfg!(windows) {
            let drives = (b'A'..=b'Z')
                .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
                .filter(|drive| drive.exists())
                .collect();
            let relative = [
                "Program Files (x86)\\Steam",
                "Program Files\\Steam",
                "Steam",
                "Games\\Steam",
            ]
            .iter()
            .map(PathBuf::from)
            .collect();
            let env = ["ProgramFiles(x86)", "ProgramFiles"]
                .iter()
                .filter_map(|var| std::env::var_os(var))
                .map(|dir| PathBuf::from(dir).join("Steam"))
                .collect();
            (drives, relative, env)
        } else {
            let relative = [
                ".local/share/Steam",
                ".steam/steam",
                ".steam/root",
                ".var/app/com.valvesoftware.Steam/.local/share/Steam",
            ]
            .iter()
            .map(PathBuf::from)
            .collect();
            let env = std::env::var_os("XDG_DATA_HOME")
                .map(|dir| vec![PathBuf::from(dir).join("Steam")])
                .unwrap_or_default();
            (vec![PATH_HOME.clone()], relative, env)
        };

        Self {
            overrides: cfg.steam_path.iter().cloned().collect(),
            authoritative,
            scan_roots,
            relative_paths,
            env_defaults,
            launcher_exe: LAUNCHER_EXE.to_string(),
        }
    }

    /// All candidates in trust order, before validation
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = self.overrides.clone();
        out.extend(self.authoritative.iter().cloned());
        for root in &self.scan_roots {
            for rel in &self.relative_paths {
                out.push(root.join(rel));
            }
        }
        out.extend(self.env_defaults.iter().cloned());
        out
    }

    pub fn find(&self) -> Option<PathBuf> {
        for candidate in self.candidates() {
            if is_valid_install_root(&candidate, &self.launcher_exe) {
                info!("Steam install root: {}", candidate.display());
                return Some(candidate);
            }
            debug!("Rejected Steam candidate {}", candidate.display());
        }
        None
    }
}

/// A directory only counts if the launcher executable is inside it
pub fn is_valid_install_root(path: &Path, launcher_exe: &str) -> bool {
    path.join(launcher_exe).is_file()
}

pub fn find_install_root(cfg: &GlobalFixConfig) -> Result<PathBuf> {
    InstallRootSearch::for_host(cfg)
        .find()
        .ok_or_else(|| ResolutionError::SteamNotFound.into())
}

/// Every Steam library on this machine, starting with the install root.
///
/// Extra libraries come from `steamapps/libraryfolders.vdf`. Paths that don't exist
/// (unplugged drives, removed folders) are dropped silently.
pub fn list_library_roots(install_root: &Path) -> Vec<PathBuf> {
    let mut folders = vec![install_root.to_path_buf()];
    let mut seen = vec![dedup_key(install_root)];

    let vdf_path = install_root.join("steamapps").join("libraryfolders.vdf");
    let content = match fs::read_to_string(&vdf_path) {
        Ok(content) => content,
        Err(_) => return folders,
    };

    for declared in declared_library_paths(&content) {
        let path = PathBuf::from(&declared);
        if !path.is_dir() {
            debug!("Skipping missing library {}", path.display());
            continue;
        }
        let key = dedup_key(&path);
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        folders.push(path);
    }

    folders
}

/// Values of every `"path"` key in libraryfolders.vdf, unescaped
fn declared_library_paths(content: &str) -> Vec<String> {
    match vdf::parse(content) {
        Ok(doc) => doc
            .string_values("path")
            .into_iter()
            .map(str::to_string)
            .collect(),
        Err(e) => {
            // Fall back to a plain pattern scan so one bad byte doesn't hide every library
            warn!("libraryfolders.vdf did not parse ({}), scanning for paths", e);
            PATH_VALUE
                .captures_iter(content)
                .filter_map(|cap| cap.get(1))
                .map(|m| vdf::unescape(m.as_str()))
                .collect()
        }
    }
}

fn dedup_key(path: &Path) -> PathBuf {
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if cfg!(windows) {
        PathBuf::from(resolved.to_string_lossy().to_lowercase())
    } else {
        resolved
    }
}
