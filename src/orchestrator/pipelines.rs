//! Pipelines module (orchestration)

pub mod apply;
pub mod locate;
pub mod remove;

pub use apply::apply_fix;
pub use locate::{locate, resolve_target};
pub use remove::remove_fix;
