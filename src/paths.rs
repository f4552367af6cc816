use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Directory of the running binary, or the working directory if that can't be resolved.
fn exe_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub static PATH_HOME: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
});

/// Bundled resources (replacement libraries, unpacker, archive tool)
pub static PATH_RES: LazyLock<PathBuf> = LazyLock::new(|| {
    let localinstall = PathBuf::from("/usr/share/globalfix");
    if localinstall.exists() {
        return localinstall;
    }
    exe_dir().join("res")
});

/// Per-user data directory holding settings.json
pub static PATH_DATA: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Ok(xdg_data_home) = env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join("globalfix");
    }
    if cfg!(windows)
        && let Some(appdata) = env::var_os("APPDATA")
    {
        return PathBuf::from(appdata).join("globalfix");
    }
    PATH_HOME.join(".local/share/globalfix")
});

/// Locate the 7-Zip executable: bundled copy first, then the usual system locations.
pub fn find_7z(resources: &std::path::Path) -> Option<PathBuf> {
    let bundled = if cfg!(windows) {
        resources.join("bin/7za.exe")
    } else {
        resources.join("bin/7za")
    };
    if bundled.exists() {
        return Some(bundled);
    }

    let bin_candidates = [
        PathBuf::from("/usr/bin"),
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("C:\\Program Files\\7-Zip"),
    ];
    for candidate in &bin_candidates {
        for name in ["7z", "7za", "7z.exe"] {
            let bin = candidate.join(name);
            if bin.exists() {
                return Some(bin);
            }
        }
    }

    None
}
