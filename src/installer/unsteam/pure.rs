//! Pure functions for the online fix
//!
//! These functions have no side effects and are deterministic.

mod ini;

pub use ini::set_ini_values;
