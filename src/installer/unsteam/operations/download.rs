//! Online fix archive download

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use reqwest::redirect::Policy;
use tracing::info;

use crate::error::{PatchError, Result};

/// Where the fix archive comes from
pub trait FixSource {
    /// Write the archive to `dest`
    fn fetch(&self, dest: &Path) -> Result<()>;
}

/// Plain HTTPS download. Hosting sends one redirect to the raw file; more than that is
/// treated as a broken link.
pub struct HttpFixSource {
    pub url: String,
}

impl FixSource for HttpFixSource {
    fn fetch(&self, dest: &Path) -> Result<()> {
        info!("Downloading online fix from {}", self.url);
        let client = reqwest::blocking::Client::builder()
            .redirect(Policy::limited(1))
            .timeout(Duration::from_secs(120))
            .build()?;

        let response = client.get(&self.url).send()?;
        if !response.status().is_success() {
            return Err(PatchError::Network(format!(
                "Download failed: HTTP {}",
                response.status()
            )));
        }

        let bytes = response.bytes()?;
        let mut file = File::create(dest)?;
        file.write_all(&bytes)?;
        info!("Downloaded {} bytes to {}", bytes.len(), dest.display());
        Ok(())
    }
}
