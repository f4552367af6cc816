//! Steam API library discovery

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::super::pure::detect_bitness;
use super::super::types::SteamApiLib;
use super::super::STEAM_API_NAMES;
use crate::util::find_files_named;

/// First Steam API library in `game_dir`: the top level is checked before the subtree,
/// which is searched at most `max_depth` levels deep
pub fn find_steam_api(game_dir: &Path, max_depth: usize) -> Option<SteamApiLib> {
    let top_level = STEAM_API_NAMES
        .iter()
        .map(|name| game_dir.join(name))
        .find(|path| path.is_file());

    let path = match top_level {
        Some(path) => path,
        None => find_files_named(game_dir, &STEAM_API_NAMES, max_depth)
            .into_iter()
            .next()?,
    };

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let header = read_header(&path);
    let is_64bit = detect_bitness(&filename, header.as_deref());

    Some(SteamApiLib { path, is_64bit })
}

/// Enough of the file to reach the PE machine field of any sane image
fn read_header(path: &Path) -> Option<Vec<u8>> {
    let mut buf = Vec::with_capacity(4096);
    File::open(path).ok()?.take(4096).read_to_end(&mut buf).ok()?;
    Some(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_top_level_preferred() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/steam_api64.dll"), "").unwrap();
        fs::write(dir.path().join("steam_api.dll"), "").unwrap();

        let lib = find_steam_api(dir.path(), 3).unwrap();
        assert_eq!(lib.path, dir.path().join("steam_api.dll"));
        assert!(!lib.is_64bit);
    }

    #[test]
    fn test_subtree_search_bounded() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("x/y/z/w")).unwrap();
        fs::write(dir.path().join("x/y/z/w/steam_api64.dll"), "").unwrap();

        assert_eq!(find_steam_api(dir.path(), 3), None);
        let lib = find_steam_api(dir.path(), 4).unwrap();
        assert!(lib.is_64bit);
        assert_eq!(lib.dir(), dir.path().join("x/y/z/w"));
    }
}
