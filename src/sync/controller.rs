use std::sync::Arc;

use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::events::{EventSink, SYNC_STATE_EVENT};
use crate::source::ReportSource;
use crate::{log_debug, log_error, log_info, log_warn};

use super::{ApplyOutcome, SyncSettings, SyncSnapshot, SyncState};

const ENABLE_LOGS: bool = true;
const LOG_TARGET: &str = "railwatch::sync";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Mount,
    Retry,
    Refresh,
}

impl Trigger {
    fn as_str(&self) -> &'static str {
        match self {
            Trigger::Mount => "mount",
            Trigger::Retry => "retry",
            Trigger::Refresh => "refresh",
        }
    }
}

type TaskSlot = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Owns the connectivity state machine and the two timers driving it.
///
/// Lock order is `state` before any task slot; nothing holding a task slot
/// ever waits on `state`.
#[derive(Clone)]
pub struct SyncController {
    state: Arc<Mutex<SyncState>>,
    source: Arc<dyn ReportSource>,
    sink: Arc<dyn EventSink>,
    settings: SyncSettings,
    cold_start_timer: TaskSlot,
    refresh_timer: TaskSlot,
    inflight: TaskSlot,
    shutdown: CancellationToken,
}

impl SyncController {
    pub fn new(
        source: Arc<dyn ReportSource>,
        sink: Arc<dyn EventSink>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SyncState::new())),
            source,
            sink,
            settings,
            cold_start_timer: Arc::new(Mutex::new(None)),
            refresh_timer: Arc::new(Mutex::new(None)),
            inflight: Arc::new(Mutex::new(None)),
            shutdown: CancellationToken::new(),
        }
    }

    pub async fn get_snapshot(&self) -> SyncSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Enters `Connecting`, issues the first fetch and schedules both timers.
    pub async fn start(&self) {
        {
            let mut state = self.state.lock().await;
            if state.is_disposed() {
                log_warn!("start requested after shutdown; ignoring");
                return;
            }
            state.begin_connecting();
            emit_sync_state(self.sink.as_ref(), &state);
        }

        log_info!(
            "sync started (cold start after {}s, refresh every {}s)",
            self.settings.cold_start_after.as_secs(),
            self.settings.refresh_every.as_secs()
        );

        self.spawn_cold_start_timer().await;
        self.spawn_fetch(Trigger::Mount).await;
        self.spawn_refresh_timer().await;
    }

    /// User-initiated reconnect. Leaves the refresh timer alone.
    pub async fn retry(&self) -> SyncSnapshot {
        let snapshot = {
            let mut state = self.state.lock().await;
            if state.is_disposed() {
                return state.snapshot();
            }
            state.begin_connecting();
            emit_sync_state(self.sink.as_ref(), &state);
            state.snapshot()
        };

        log_info!("manual retry requested");

        self.spawn_cold_start_timer().await;
        self.spawn_fetch(Trigger::Retry).await;
        snapshot
    }

    /// Cancels every timer; late responses are dropped from here on.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        self.state.lock().await.dispose();

        for slot in [&self.cold_start_timer, &self.refresh_timer, &self.inflight] {
            abort_slot(slot).await;
        }

        log_info!("sync controller shut down");
    }

    async fn spawn_fetch(&self, trigger: Trigger) {
        let mut slot = self.inflight.lock().await;
        if let Some(handle) = slot.take() {
            handle.abort();
        }

        let controller = self.clone();
        *slot = Some(tokio::spawn(async move {
            controller.fetch_once(trigger).await;
        }));
    }

    async fn spawn_cold_start_timer(&self) {
        let mut slot = self.cold_start_timer.lock().await;
        if let Some(handle) = slot.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let sink = self.sink.clone();
        let after = self.settings.cold_start_after;
        let shutdown = self.shutdown.clone();

        *slot = Some(tokio::spawn(async move {
            tokio::select! {
                _ = time::sleep(after) => {
                    let mut guard = state.lock().await;
                    if guard.escalate_cold_start() {
                        log_info!("no response after {}s, backend is probably waking up", after.as_secs());
                        emit_sync_state(sink.as_ref(), &guard);
                    }
                }
                _ = shutdown.cancelled() => {}
            }
        }));
    }

    async fn spawn_refresh_timer(&self) {
        let mut slot = self.refresh_timer.lock().await;
        if let Some(handle) = slot.take() {
            handle.abort();
        }

        let controller = self.clone();
        let every = self.settings.refresh_every;

        *slot = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let accepts = controller.state.lock().await.accepts_refresh();
                        if accepts {
                            controller.fetch_once(Trigger::Refresh).await;
                        } else {
                            log_debug!("skipping refresh while the error screen waits for a retry");
                        }
                    }
                    _ = controller.shutdown.cancelled() => break,
                }
            }
        }));
    }

    async fn fetch_once(&self, trigger: Trigger) {
        let seq = {
            let mut state = self.state.lock().await;
            if state.is_disposed() {
                return;
            }
            state.issue_request()
        };

        log_debug!("fetching live report #{seq} ({})", trigger.as_str());

        let result = tokio::select! {
            result = self.source.fetch_report() => result,
            _ = self.shutdown.cancelled() => {
                log_debug!("dropping live report #{seq}: controller shut down");
                return;
            }
        };

        if let Err(err) = &result {
            log_error!("live report #{seq} ({}) failed: {err}", trigger.as_str());
        }

        let mut state = self.state.lock().await;
        match state.apply_result(seq, result) {
            ApplyOutcome::Applied => {
                emit_sync_state(self.sink.as_ref(), &state);
                abort_slot(&self.cold_start_timer).await;
            }
            ApplyOutcome::Stale => {
                log_debug!("discarding stale live report #{seq}");
            }
        }
    }
}

async fn abort_slot(slot: &Mutex<Option<JoinHandle<()>>>) {
    if let Some(handle) = slot.lock().await.take() {
        handle.abort();
    }
}

fn emit_sync_state(sink: &dyn EventSink, state: &SyncState) {
    match serde_json::to_value(state.snapshot()) {
        Ok(payload) => {
            if let Err(err) = sink.emit(SYNC_STATE_EVENT, payload) {
                log_warn!("failed to emit {SYNC_STATE_EVENT}: {err}");
            }
        }
        Err(err) => log_error!("failed to serialize sync state: {err}"),
    }
}
