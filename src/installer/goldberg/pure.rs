//! Pure functions for Goldberg
//!
//! These functions have no side effects and are deterministic.

mod achievements;
mod bitness;
mod settings;

pub use achievements::{build_manifest, icon_file_names};
pub use bitness::{detect_bitness, pe_is_64bit};
pub use settings::{render_app_ini, render_broadcasts, render_main_ini, render_overlay_ini, render_user_ini};
