//! Push channel towards the presentation layer.

use anyhow::Result;
use log::info;
use serde_json::Value;

pub const SYNC_STATE_EVENT: &str = "sync-state-changed";

/// Receives named events with a JSON payload, the way a webview bridge does.
pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: &str, payload: Value) -> Result<()>;
}

/// Headless sink: writes a one-line summary of each event to the log.
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &str, payload: Value) -> Result<()> {
        let phase = payload
            .get("phase")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        match payload.get("report").filter(|report| !report.is_null()) {
            Some(report) => {
                let section = report.get("sectionName").and_then(Value::as_str).unwrap_or("?");
                let trains = report
                    .get("trains")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len);
                info!("{event}: {phase} ({section}, {trains} trains)");
            }
            None => {
                let detail = payload
                    .get("error")
                    .and_then(Value::as_str)
                    .or_else(|| payload.get("loadingMessage").and_then(Value::as_str))
                    .unwrap_or("");
                info!("{event}: {phase} - {detail}");
            }
        }

        Ok(())
    }
}
