pub mod commands;
pub mod config;
pub mod controller;
pub mod state;

pub use config::{SyncSettings, COLD_START_THRESHOLD, REFRESH_INTERVAL, REQUEST_TIMEOUT};
pub use controller::SyncController;
pub use state::{
    ApplyOutcome, SyncPhase, SyncSnapshot, SyncState, COLD_START_MESSAGE,
    DEFAULT_LOADING_MESSAGE,
};
