use std::time::Duration;

/// How long the first fetch may take before the loading screen says the
/// backend is waking up.
pub const COLD_START_THRESHOLD: Duration = Duration::from_secs(8);

/// Background refresh cadence. 30 s is the documented rate for the live view.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Per-request ceiling applied by the HTTP client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Timing knobs of the sync controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    pub cold_start_after: Duration,
    pub refresh_every: Duration,
    pub request_timeout: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            cold_start_after: COLD_START_THRESHOLD,
            refresh_every: REFRESH_INTERVAL,
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}
