//! Archive extraction

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};
use zip::ZipArchive;

use crate::error::{PatchError, Result};
use crate::paths::find_7z;

pub trait Extractor {
    /// Unpack every entry of `archive` into `dest`, overwriting existing files
    fn extract(&self, archive: &Path, dest: &Path) -> Result<()>;
}

/// External 7-Zip binary
pub struct SevenZip {
    pub binary: PathBuf,
}

impl Extractor for SevenZip {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        let mut out_arg = OsString::from("-o");
        out_arg.push(dest);

        info!("Extracting {} with {}", archive.display(), self.binary.display());
        let output = Command::new(&self.binary)
            .arg("x")
            .arg("-y")
            .arg(out_arg)
            .arg(archive)
            .output()
            .map_err(|e| {
                PatchError::Tool(format!("Could not run {}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            return Err(PatchError::Tool(format!(
                "7-Zip failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// Built-in zip reader, used when no 7-Zip binary is around
pub struct ZipExtractor;

impl Extractor for ZipExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        info!("Extracting {}", archive.display());
        let mut zip = ZipArchive::new(BufReader::new(File::open(archive)?))?;

        for i in 0..zip.len() {
            let mut file = zip.by_index(i)?;
            let outpath = match file.enclosed_name() {
                Some(path) => dest.join(path),
                None => {
                    warn!("Skipping unsafe archive entry {}", file.name());
                    continue;
                }
            };

            if file.is_dir() {
                fs::create_dir_all(&outpath)?;
            } else {
                if let Some(parent) = outpath.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut outfile = File::create(&outpath)?;
                io::copy(&mut file, &mut outfile)?;
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = file.unix_mode() {
                    fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
                }
            }
        }

        Ok(())
    }
}

/// 7-Zip if one can be found, the built-in reader otherwise
pub fn default_extractor(resources: &Path) -> Box<dyn Extractor> {
    match find_7z(resources) {
        Some(binary) => Box::new(SevenZip { binary }),
        None => {
            info!("No 7-Zip binary found, using built-in zip extraction");
            Box::new(ZipExtractor)
        }
    }
}

/// File entries of a zip archive, as stored (forward slashes)
pub fn list_archive_entries(archive: &Path) -> Result<Vec<String>> {
    let zip = ZipArchive::new(BufReader::new(File::open(archive)?))?;
    Ok(zip
        .file_names()
        .filter(|name| !name.ends_with('/'))
        .map(str::to_string)
        .collect())
}
