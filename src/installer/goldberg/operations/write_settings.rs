//! steam_settings file generation

use std::fs;
use std::path::Path;

use tracing::debug;

use super::super::pure::{
    render_app_ini, render_broadcasts, render_main_ini, render_overlay_ini, render_user_ini,
};
use super::super::types::GoldbergOptions;
use crate::error::Result;

/// Write the emulator's configuration into `dir`:
/// - steam_appid.txt
/// - configs.user.ini (account name, steam id, language)
/// - configs.main.ini (networking)
/// - configs.overlay.ini
/// - configs.app.ini (DLC unlock)
/// - custom_broadcasts.txt (only with a custom broadcast address)
pub fn write_steam_settings(dir: &Path, app_id: &str, opts: &GoldbergOptions) -> Result<()> {
    fs::write(dir.join("steam_appid.txt"), app_id)?;
    fs::write(dir.join("configs.user.ini"), render_user_ini(opts))?;
    fs::write(dir.join("configs.main.ini"), render_main_ini(opts))?;
    fs::write(dir.join("configs.overlay.ini"), render_overlay_ini(opts))?;
    fs::write(dir.join("configs.app.ini"), render_app_ini())?;

    let broadcasts = dir.join("custom_broadcasts.txt");
    match render_broadcasts(opts) {
        Some(content) => fs::write(&broadcasts, content)?,
        None => {
            // Stale from an earlier run with a different address
            crate::util::remove_file_if_exists(&broadcasts)?;
        }
    }

    debug!("Wrote steam_settings in {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_fixed_file_set() {
        let dir = tempfile::tempdir().unwrap();
        write_steam_settings(dir.path(), "337320", &GoldbergOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("steam_appid.txt")).unwrap(),
            "337320"
        );
        for name in [
            "configs.user.ini",
            "configs.main.ini",
            "configs.overlay.ini",
            "configs.app.ini",
        ] {
            assert!(dir.path().join(name).is_file(), "{} missing", name);
        }
        assert!(!dir.path().join("custom_broadcasts.txt").exists());
    }

    #[test]
    fn test_broadcast_file_follows_option() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = GoldbergOptions {
            custom_broadcast_ip: Some("192.168.1.20".to_string()),
            ..Default::default()
        };
        write_steam_settings(dir.path(), "480", &opts).unwrap();
        assert!(dir.path().join("custom_broadcasts.txt").is_file());

        opts.custom_broadcast_ip = None;
        write_steam_settings(dir.path(), "480", &opts).unwrap();
        assert!(!dir.path().join("custom_broadcasts.txt").exists());
    }
}
