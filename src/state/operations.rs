mod evidence;
mod store;

pub use evidence::gather_evidence;
pub use store::{delete_state, load_state, save_state, state_path, STATE_FILE};
