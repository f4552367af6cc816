//! Fake Steam install with one game, shared by the pipeline tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{InstallerFactory, Patcher};
use crate::config::{GlobalFixConfig, LauncherTimings};
use crate::error::Result;
use crate::installer::unsteam::{write_zip, FixSource, PlayerIdentity, ZipExtractor};
use crate::installer::{Goldberg, GoldbergOptions, Installer, Steamless, Unsteam};
use crate::steam::{LauncherControl, SteamInstall};

const MANIFEST: &str = "\"AppState\"\n{\n\t\"appid\"\t\t\"337320\"\n\t\"name\"\t\t\"Pass the Red\"\n\t\"installdir\"\t\t\"PTTR\"\n}\n";

const PROFILE: &str = "\"UserLocalConfigStore\"\n{\n\t\"Software\"\n\t{\n\t\t\"Valve\"\n\t\t{\n\t\t\t\"Steam\"\n\t\t\t{\n\t\t\t\t\"apps\"\n\t\t\t\t{\n\t\t\t\t\t\"337320\"\n\t\t\t\t\t{\n\t\t\t\t\t\t\"LastPlayed\"\t\t\"1700000000\"\n\t\t\t\t\t}\n\t\t\t\t}\n\t\t\t}\n\t\t}\n\t}\n}\n";

const FIX_INI: &str = "[loader]\nexe_file=\ndll_file=\n\n[game]\nreal_app_id=\n";

struct ArchiveSource {
    archive: PathBuf,
}

impl FixSource for ArchiveSource {
    fn fetch(&self, dest: &Path) -> Result<()> {
        fs::copy(&self.archive, dest)?;
        Ok(())
    }
}

struct IdleSteam;

impl LauncherControl for IdleSteam {
    fn is_running(&self) -> bool {
        false
    }

    fn terminate(&self) -> bool {
        false
    }

    fn restart(&self) -> Result<()> {
        Ok(())
    }
}

struct LocalInstallers {
    resources_dir: PathBuf,
    archive: PathBuf,
    temp_dir: PathBuf,
}

impl InstallerFactory for LocalInstallers {
    fn steamless(&self) -> Box<dyn Installer> {
        Box::new(Steamless::new(&self.resources_dir, None))
    }

    fn unsteam(&self, identity: PlayerIdentity) -> Box<dyn Installer> {
        Box::new(Unsteam {
            source: Box::new(ArchiveSource {
                archive: self.archive.clone(),
            }),
            extractor: Box::new(ZipExtractor),
            identity,
            temp_dir: self.temp_dir.clone(),
        })
    }

    fn goldberg(&self, options: GoldbergOptions) -> Box<dyn Installer> {
        Box::new(Goldberg::new(options, &self.resources_dir))
    }
}

/// `Steam/` with AppID 337320 installed at `steamapps/common/PTTR`, the executable two
/// levels down, one profile that has launched the game, and a resources folder holding
/// the Goldberg libraries but no Steamless
pub struct SteamTree {
    dir: TempDir,
}

impl SteamTree {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let tree = Self { dir };

        let steamapps = tree.steam_root().join("steamapps");
        fs::create_dir_all(tree.exe_dir()).unwrap();
        fs::write(steamapps.join("appmanifest_337320.acf"), MANIFEST).unwrap();
        fs::write(tree.exe_dir().join("PTTR.exe"), "game").unwrap();
        fs::write(tree.exe_dir().join("steam_api64.dll"), "real api").unwrap();

        fs::create_dir_all(tree.profile().parent().unwrap()).unwrap();
        fs::write(tree.profile(), PROFILE).unwrap();

        let goldberg = tree.resources_dir().join("goldberg");
        fs::create_dir_all(&goldberg).unwrap();
        fs::write(goldberg.join("steam_api64.dll"), "emu64").unwrap();
        fs::write(goldberg.join("steam_api.dll"), "emu32").unwrap();

        fs::create_dir_all(tree.dir.path().join("tmp")).unwrap();
        write_zip(
            &tree.archive(),
            &[
                ("unsteam.ini", FIX_INI),
                ("unsteam64.dll", "dll"),
                ("unsteam_loader64.exe", "loader"),
            ],
        );
        tree
    }

    pub fn steam_root(&self) -> PathBuf {
        self.dir.path().join("Steam")
    }

    pub fn game_dir(&self) -> PathBuf {
        self.steam_root().join("steamapps/common/PTTR")
    }

    pub fn exe_dir(&self) -> PathBuf {
        self.game_dir().join("Binaries/Win64")
    }

    pub fn profile(&self) -> PathBuf {
        self.steam_root().join("userdata/1001/config/localconfig.vdf")
    }

    fn resources_dir(&self) -> PathBuf {
        self.dir.path().join("res")
    }

    fn archive(&self) -> PathBuf {
        self.dir.path().join("GlobalFix.zip")
    }

    pub fn patcher(&self) -> Patcher {
        let cfg = GlobalFixConfig {
            steam_path: Some(self.steam_root()),
            resources_dir: Some(self.resources_dir()),
            launcher: LauncherTimings::immediate(),
            ..Default::default()
        };
        Patcher {
            cfg,
            steam: SteamInstall::new(self.steam_root()),
            launcher: Box::new(IdleSteam),
            installers: Box::new(LocalInstallers {
                resources_dir: self.resources_dir(),
                archive: self.archive(),
                temp_dir: self.dir.path().join("tmp"),
            }),
        }
    }
}
