//! Where live reports come from.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ReportSnapshot;

pub use http::{HttpReportSource, LIVE_REPORT_PATH};

/// The one message the dashboard shows for any failed fetch.
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Failed to connect to the backend. Please ensure it's running and accessible.";

/// Why a fetch failed. The cause is kept for logs only; every variant
/// surfaces to the user as [`CONNECTION_FAILED_MESSAGE`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("backend answered with HTTP {0}")]
    Status(u16),
    #[error("report payload could not be decoded: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        CONNECTION_FAILED_MESSAGE
    }
}

#[async_trait]
pub trait ReportSource: Send + Sync + 'static {
    async fn fetch_report(&self) -> Result<ReportSnapshot, FetchError>;
}
