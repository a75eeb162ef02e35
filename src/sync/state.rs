use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::ReportSnapshot;
use crate::source::FetchError;

pub const DEFAULT_LOADING_MESSAGE: &str = "Loading Railway AI Dashboard...";
pub const COLD_START_MESSAGE: &str =
    "Waking up the backend. This can take up to a minute on a cold start...";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SyncPhase {
    #[default]
    Connecting,
    ColdStartWaiting,
    Ready,
    Error,
}

impl SyncPhase {
    pub fn loading_message(&self) -> &'static str {
        match self {
            SyncPhase::ColdStartWaiting => COLD_START_MESSAGE,
            SyncPhase::Connecting | SyncPhase::Ready | SyncPhase::Error => {
                DEFAULT_LOADING_MESSAGE
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer response was already applied, or the controller is gone.
    Stale,
}

/// What the presentation layer is allowed to see.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    pub phase: SyncPhase,
    pub loading_message: String,
    pub error: Option<String>,
    /// Only populated in [`SyncPhase::Ready`].
    pub report: Option<Arc<ReportSnapshot>>,
}

/// Connectivity state of one dashboard session.
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    pub phase: SyncPhase,
    /// Survives failed refreshes; hidden from consumers outside `Ready`.
    pub last_snapshot: Option<Arc<ReportSnapshot>>,
    pub last_error: Option<String>,
    issued_seq: u64,
    applied_seq: u64,
    disposed: bool,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_connecting(&mut self) {
        self.phase = SyncPhase::Connecting;
        self.last_error = None;
    }

    /// Returns true when the phase actually changed.
    pub fn escalate_cold_start(&mut self) -> bool {
        if self.disposed || self.phase != SyncPhase::Connecting {
            return false;
        }
        self.phase = SyncPhase::ColdStartWaiting;
        true
    }

    /// Sequence number for a fetch about to be issued.
    pub fn issue_request(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    pub fn apply_result(
        &mut self,
        seq: u64,
        result: Result<ReportSnapshot, FetchError>,
    ) -> ApplyOutcome {
        if self.disposed || seq <= self.applied_seq {
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(report) => {
                self.applied_seq = seq;
                self.phase = SyncPhase::Ready;
                self.last_snapshot = Some(Arc::new(report));
                self.last_error = None;
            }
            Err(err) => {
                // Older successes still in flight stay behind the error;
                // newer requests (a retry) may still land.
                self.applied_seq = seq;
                self.phase = SyncPhase::Error;
                self.last_error = Some(err.user_message().to_string());
            }
        }

        ApplyOutcome::Applied
    }

    /// Background refreshes pause while the error screen waits for a retry.
    pub fn accepts_refresh(&self) -> bool {
        !self.disposed && self.phase != SyncPhase::Error
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        let report = match self.phase {
            SyncPhase::Ready => self.last_snapshot.clone(),
            _ => None,
        };
        let error = match self.phase {
            SyncPhase::Error => self.last_error.clone(),
            _ => None,
        };

        SyncSnapshot {
            phase: self.phase,
            loading_message: self.phase.loading_message().to_string(),
            error,
            report,
        }
    }
}
