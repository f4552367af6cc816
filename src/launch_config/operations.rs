mod profiles;
mod wait;

pub use profiles::edit_profiles;
pub use wait::{wait_for_exit, wait_for_stable};
