pub mod config_state;
pub mod event_state;
pub mod state_manager;

pub use state_manager::State;
