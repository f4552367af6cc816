mod achievements;
mod find_dll;
mod swap;
mod write_settings;

pub use achievements::{write_achievements, AchievementSource, SteamWebApi};
pub use find_dll::find_steam_api;
pub use swap::{install_replacement, restore_backups};
pub use write_settings::write_steam_settings;
