//! Pure functions for launch options
//!
//! These functions have no side effects and are deterministic.

mod edit;

pub use edit::{clear_launch_options, has_app_block, set_launch_options};
