pub mod operations;
pub mod types;

// Re-export types
pub use types::{GlobalFixConfig, LauncherTimings};

// Re-export operations
pub use operations::{load_cfg, load_cfg_from, save_cfg, save_cfg_to};
