use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Files under `root` (at most `max_depth` levels below it) whose name matches one of
/// `names` case-insensitively, in name-sorted walk order
pub fn find_files_named(root: &Path, names: &[&str], max_depth: usize) -> Vec<PathBuf> {
    find_files_where(root, max_depth, |name| {
        names.iter().any(|wanted| wanted.eq_ignore_ascii_case(name))
    })
}

/// Files under `root` whose lowercased name ends with `suffix`
pub fn find_files_with_suffix(root: &Path, suffix: &str, max_depth: usize) -> Vec<PathBuf> {
    let suffix = suffix.to_lowercase();
    find_files_where(root, max_depth, |name| name.to_lowercase().ends_with(&suffix))
}

fn find_files_where(
    root: &Path,
    max_depth: usize,
    matches: impl Fn(&str) -> bool,
) -> Vec<PathBuf> {
    // walkdir counts `root` itself as depth 0, so files directly inside it are depth 1
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth.saturating_add(1))
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_str().map(&matches).unwrap_or(false))
        .map(|e| e.into_path())
        .collect()
}

/// `foo.dll` -> `foo.dll.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// `path` relative to `base`, joined with `/`. `None` unless `path` lies below `base`.
pub fn relative_path(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts = rel
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Join a `/`-separated relative path onto `base`. Anything that could leave `base`
/// gives `None`.
pub fn resolve_relative(base: &Path, relative: &str) -> Option<PathBuf> {
    let mut path = base.to_path_buf();
    for part in relative.split('/') {
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => path.push(part),
            _ => return None,
        }
    }
    Some(path)
}

/// Remove a file if it's there; a missing file is not an error
pub fn remove_file_if_exists(path: &Path) -> std::io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
