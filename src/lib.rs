//! Patches installed Steam games for LAN/online play without the Steam client's
//! multiplayer services, and undoes those patches again.

pub mod config;
pub mod error;
pub mod installer;
pub mod launch_config;
pub mod orchestrator;
pub mod paths;
pub mod state;
pub mod steam;
pub mod util;
pub mod vdf;
