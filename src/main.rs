use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use globalfix::config::{load_cfg, load_cfg_from, save_cfg, save_cfg_to, GlobalFixConfig};
use globalfix::orchestrator::{
    ApplyRequest, ApplyResponse, LocateResponse, Patcher, RemoveRequest, RemoveResponse,
};
use globalfix::steam::{AppCatalog, APP_LIST_URL};

#[derive(Parser)]
#[command(
    name = "globalfix",
    version,
    about = "Apply and remove online fixes, Goldberg and Steamless on installed Steam games"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, help = "Log at debug level")]
    verbose: bool,

    #[arg(long, global = true, help = "Settings file to use instead of the default")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Steam install folder to try first")]
    steam_path: Option<PathBuf>,

    #[arg(long, global = true, help = "Folder with the bundled tools and libraries")]
    resources: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Patch an installed game")]
    Apply(ApplyArgs),

    #[command(about = "Undo patches; without flags, removes whatever is applied")]
    Remove {
        app_id: String,
        #[arg(long)]
        unsteam: bool,
        #[arg(long)]
        goldberg: bool,
        #[arg(long)]
        steamless: bool,
    },

    #[command(about = "Show the Steam install, its libraries and optionally a game's status")]
    Locate { app_id: Option<String> },

    #[command(about = "Search the Steam app list by name")]
    Search { query: String },

    #[command(about = "Print the effective settings")]
    Settings {
        #[arg(long, help = "Also write them to the settings file")]
        write: bool,
    },
}

#[derive(Args)]
struct ApplyArgs {
    app_id: String,

    #[arg(long, help = "Skip the online fix")]
    no_unsteam: bool,
    #[arg(long, help = "Install the Goldberg emulator")]
    goldberg: bool,
    #[arg(long, help = "Strip SteamStub DRM from the executable")]
    steamless: bool,

    #[arg(long, help = "SteamID written into unsteam.ini")]
    steam_id: Option<String>,
    #[arg(long, help = "Player name for the online fix and Goldberg")]
    username: Option<String>,

    #[arg(long, help = "Steam Web API key for achievements")]
    api_key: Option<String>,
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    listen_port: Option<u16>,
    #[arg(long)]
    broadcast_ip: Option<String>,
    #[arg(long)]
    disable_networking: bool,
    #[arg(long)]
    offline: bool,
    #[arg(long)]
    overlay: bool,
    #[arg(long)]
    achievement_images: bool,
}

impl ApplyArgs {
    fn into_request(self, cfg: &GlobalFixConfig) -> ApplyRequest {
        let goldberg_options = self.goldberg.then(|| {
            let mut options = cfg.goldberg.clone();
            if let Some(name) = &self.username {
                options.account_name = name.clone();
            }
            if let Some(key) = self.api_key.clone() {
                options.steam_api_key = Some(key);
            }
            if let Some(language) = self.language.clone() {
                options.language = language;
            }
            if let Some(port) = self.listen_port {
                options.listen_port = port;
            }
            if let Some(ip) = self.broadcast_ip.clone() {
                options.custom_broadcast_ip = Some(ip);
            }
            options.disable_networking |= self.disable_networking;
            options.offline_mode |= self.offline;
            options.enable_overlay |= self.overlay;
            options.generate_achievement_images |= self.achievement_images;
            options
        });

        ApplyRequest {
            app_id: self.app_id,
            unsteam_enabled: !self.no_unsteam,
            goldberg_enabled: self.goldberg,
            goldberg_options,
            steamless_enabled: self.steamless,
            steam_id: self.steam_id,
            username: self.username,
        }
    }
}

/// Print `value` as pretty JSON and map `success` to the exit code
fn report<T: Serialize>(value: &T, success: bool) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            error!("Could not serialize result: {}", e);
            return ExitCode::FAILURE;
        }
    }
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = match &cli.config {
        Some(path) => load_cfg_from(path),
        None => load_cfg(),
    };
    if let Some(path) = cli.steam_path {
        cfg.steam_path = Some(path);
    }
    if let Some(path) = cli.resources {
        cfg.resources_dir = Some(path);
    }
    debug!("Settings: {:?}", cfg);

    match cli.command {
        Commands::Search { query } => {
            let mut catalog = AppCatalog::new(APP_LIST_URL);
            match catalog.search(&query) {
                Ok(results) => report(&json!({ "success": true, "results": results }), true),
                Err(e) => report(&json!({ "success": false, "error": e.to_string() }), false),
            }
        }
        Commands::Settings { write } => {
            if write {
                let saved = match &cli.config {
                    Some(path) => save_cfg_to(&cfg, path),
                    None => save_cfg(&cfg),
                };
                if let Err(e) = saved {
                    return report(&json!({ "success": false, "error": e.to_string() }), false);
                }
            }
            report(&cfg, true)
        }
        Commands::Apply(args) => {
            let patcher = match Patcher::from_host(cfg) {
                Ok(patcher) => patcher,
                Err(e) => return report(&ApplyResponse::failed(&e), false),
            };
            let resp = patcher.apply(&args.into_request(&patcher.cfg));
            report(&resp, resp.success)
        }
        Commands::Remove {
            app_id,
            unsteam,
            goldberg,
            steamless,
        } => {
            let patcher = match Patcher::from_host(cfg) {
                Ok(patcher) => patcher,
                Err(e) => return report(&RemoveResponse::failed(&e), false),
            };
            // No flags: let the record and backups decide
            let explicit = unsteam || goldberg || steamless;
            let req = RemoveRequest {
                app_id,
                remove_unsteam: explicit.then_some(unsteam),
                remove_goldberg: explicit.then_some(goldberg),
                remove_steamless: explicit.then_some(steamless),
            };
            let resp = patcher.remove(&req);
            report(&resp, resp.success)
        }
        Commands::Locate { app_id } => {
            let patcher = match Patcher::from_host(cfg) {
                Ok(patcher) => patcher,
                Err(e) => {
                    let resp = LocateResponse {
                        error: Some(e.to_string()),
                        ..Default::default()
                    };
                    return report(&resp, false);
                }
            };
            let resp = patcher.locate(app_id.as_deref());
            report(&resp, resp.success)
        }
    }
}
