//! Primary executable heuristic
//!
//! The first `.exe` (in name order) whose name doesn't look like a
//! helper tool wins. Games shipping several real executables, or none at the top
//! level, may resolve to the wrong file or to nothing.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Lowercased substrings that mark an executable as a helper rather than the game
pub const EXCLUDED_KEYWORDS: [&str; 7] = [
    "uninstall",
    "crash",
    "report",
    "setup",
    "config",
    "launcher",
    "unsteam",
];

pub fn is_executable_candidate(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    lower.ends_with(".exe") && !EXCLUDED_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Immediate children of `dir`, sorted by file name, split into (files, dirs)
fn list_sorted(dir: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        } else if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    (files, dirs)
}

/// Find the game's main executable under `dir`.
///
/// Candidates in `dir` itself win outright; otherwise each subdirectory is searched the
/// same way, depth-first, descending at most `max_depth` levels.
pub fn find_primary_executable(dir: &Path, max_depth: usize) -> Option<PathBuf> {
    let (files, dirs) = list_sorted(dir);

    let first = files.into_iter().find(|path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(is_executable_candidate)
            .unwrap_or(false)
    });
    if first.is_some() {
        return first;
    }

    if max_depth == 0 {
        return None;
    }

    dirs.iter()
        .find_map(|sub| find_primary_executable(sub, max_depth - 1))
}
