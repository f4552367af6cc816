//! `.globalfix_state.json` persistence

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::super::types::PatchState;
use crate::error::Result;
use crate::util::remove_file_if_exists;

pub const STATE_FILE: &str = ".globalfix_state.json";

pub fn state_path(install_dir: &Path) -> PathBuf {
    install_dir.join(STATE_FILE)
}

/// Read the record for a game folder.
///
/// A missing file is `None`. So is a corrupt one: the record is only a hint and the
/// backup files still tell the truth.
pub fn load_state(install_dir: &Path) -> Option<PatchState> {
    let path = state_path(install_dir);
    let file = File::open(&path).ok()?;
    match serde_json::from_reader(BufReader::new(file)) {
        Ok(state) => Some(state),
        Err(e) => {
            warn!("Ignoring unreadable {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(windows)]
const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

/// Open the record for writing. On Windows it is created hidden; an existing hidden
/// file can only be overwritten when the attribute is passed again.
fn create_record(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        options.attributes(FILE_ATTRIBUTE_HIDDEN);
    }
    options.open(path)
}

pub fn save_state(install_dir: &Path, state: &PatchState) -> Result<()> {
    let path = state_path(install_dir);
    let file = create_record(&path)?;
    serde_json::to_writer_pretty(file, state)?;
    debug!("Saved patch state to {}", path.display());
    Ok(())
}

pub fn delete_state(install_dir: &Path) -> Result<()> {
    if remove_file_if_exists(&state_path(install_dir))? {
        info!("Removed patch state from {}", install_dir.display());
    }
    Ok(())
}
