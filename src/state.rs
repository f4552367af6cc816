//! Per-game patch record - which components are applied
//!
//! A small JSON file in the game's install folder remembers which components were
//! applied. Backup files on disk are a second, independent signal; when the two
//! disagree the on-disk evidence wins.
//!
//! ## Module Structure
//! - `types.rs`: PatchState, Component, ComponentFlags, evidence types
//! - `pure/`: evidence reconciliation
//! - `operations/`: load/save/delete and on-disk evidence gathering

mod operations;
mod pure;
mod types;

pub use operations::{delete_state, gather_evidence, load_state, save_state, state_path, STATE_FILE};
pub use pure::{reconcile, removal_defaults};
pub use types::{
    Component, ComponentEvidence, ComponentFlags, Evidence, PatchEvidence, PatchState,
};
