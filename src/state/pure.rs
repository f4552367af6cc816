//! Pure functions for patch state
//!
//! These functions have no side effects and are deterministic.

mod reconcile;

pub use reconcile::{reconcile, removal_defaults};
