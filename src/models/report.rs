use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::decision::AIDecision;
use super::helpers::{null_as_default, present_entries, whole_count};
use super::train::TrainState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SectionMetrics {
    #[serde(default, deserialize_with = "whole_count")]
    pub active_trains: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_delay_minutes: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_speed_kmh: f64,
    /// Share of bottleneck capacity in use, 0.0..=1.0.
    #[serde(default, deserialize_with = "null_as_default")]
    pub bottleneck_utilization: f64,
    #[serde(default, deserialize_with = "whole_count")]
    pub total_scheduled_trains: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct StationState {
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub km: f64,
}

/// One successful `/api/live_report` response.
///
/// Decoded from the snake_case wire format, serialized camelCase for the
/// presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ReportSnapshot {
    /// Kept verbatim; see [`ReportSnapshot::generated_at`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(
        rename(deserialize = "section"),
        alias = "section_name",
        default,
        deserialize_with = "null_as_default"
    )]
    pub section_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: SectionMetrics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trains: Vec<TrainState>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stations: Vec<StationState>,
    /// `null` entries are dropped; those trains have no recommendation.
    #[serde(default, deserialize_with = "present_entries")]
    pub decisions: BTreeMap<String, AIDecision>,
}

impl ReportSnapshot {
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Upstream timestamps are RFC 3339 or naive ISO-8601 (read as UTC).
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Decisions keyed by a train number that is not in `trains` are never
    /// reachable through this lookup.
    pub fn decision_for(&self, train_number: &str) -> Option<&AIDecision> {
        self.decisions.get(train_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DecisionKind, TrainStatus};

    const SAMPLE: &str = r#"{
        "timestamp": "2025-03-14T09:26:53.589793",
        "section": "Solapur-Wadi",
        "metrics": {
            "active_trains": 2,
            "average_delay_minutes": 12.5,
            "average_speed_kmh": 58.2,
            "bottleneck_utilization": 0.42,
            "total_scheduled_trains": 9
        },
        "trains": [
            {"train_number": "12345", "train_name": "Express", "train_type": "passenger",
             "origin": "SUR", "destination": "WDI", "current_km": 30.2, "speed": 80,
             "delay_minutes": 20, "status": "delayed"},
            {"train_number": "67890", "train_name": "Goods", "train_type": "freight",
             "origin": "WDI", "destination": "SUR", "current_km": 300.0, "speed": 45,
             "delay_minutes": 5, "status": "running"}
        ],
        "stations": [
            {"code": "SUR", "name": "Solapur", "km": 0.0},
            {"code": "WDI", "name": "Wadi", "km": 455.3}
        ],
        "decisions": {
            "12345": {"decision": "Hold/Reroute", "reasoning": "Crossing at Hotgi", "confidence": 0.91},
            "99999": {"decision": "Reduce speed", "reasoning": "Orphan", "confidence": 0.5}
        }
    }"#;

    #[test]
    fn decodes_full_report() {
        let report = ReportSnapshot::from_json(SAMPLE.as_bytes()).unwrap();

        assert_eq!(report.section_name, "Solapur-Wadi");
        assert_eq!(report.metrics.active_trains, 2);
        assert_eq!(report.trains.len(), 2);
        assert_eq!(report.stations[1].km, 455.3);
        assert_eq!(report.trains[0].status, TrainStatus::Delayed);
        assert_eq!(
            report.decision_for("12345").map(|d| d.kind),
            Some(DecisionKind::HoldOrReroute)
        );
        assert!(report.decision_for("67890").is_none());
    }

    #[test]
    fn naive_timestamp_is_read_as_utc() {
        let report = ReportSnapshot::from_json(SAMPLE.as_bytes()).unwrap();
        let generated = report.generated_at().unwrap();
        assert_eq!(generated.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-03-14 09:26:53");
    }

    #[test]
    fn rfc3339_timestamp_keeps_offset() {
        let report = ReportSnapshot {
            timestamp: "2025-03-14T11:00:00+02:00".into(),
            ..Default::default()
        };
        let generated = report.generated_at().unwrap();
        assert_eq!(generated.format("%H:%M").to_string(), "09:00");
    }

    #[test]
    fn garbage_timestamp_is_none() {
        let report = ReportSnapshot {
            timestamp: "yesterday-ish".into(),
            ..Default::default()
        };
        assert!(report.generated_at().is_none());
    }

    #[test]
    fn sparse_payload_uses_defaults() {
        let report = ReportSnapshot::from_json(br#"{"section": "X", "trains": null}"#).unwrap();
        assert!(report.trains.is_empty());
        assert!(report.decisions.is_empty());
        assert_eq!(report.metrics, SectionMetrics::default());
    }

    #[test]
    fn float_counters_are_rounded() {
        let report = ReportSnapshot::from_json(
            br#"{"metrics": {"active_trains": 3.0, "total_scheduled_trains": -2, "average_speed_kmh": null}}"#,
        )
        .unwrap();
        assert_eq!(report.metrics.active_trains, 3);
        assert_eq!(report.metrics.total_scheduled_trains, 0);
        assert_eq!(report.metrics.average_speed_kmh, 0.0);
    }

    #[test]
    fn null_decisions_are_dropped() {
        let report = ReportSnapshot::from_json(
            br#"{"decisions": {"1": null, "2": {"decision": "Reduce speed", "confidence": 0.7}}}"#,
        )
        .unwrap();
        assert!(report.decision_for("1").is_none());
        assert_eq!(
            report.decision_for("2").map(|d| d.kind),
            Some(DecisionKind::ReduceSpeed)
        );
    }

    #[test]
    fn serializes_camel_case_for_the_presentation_layer() {
        let report = ReportSnapshot::from_json(SAMPLE.as_bytes()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["sectionName"], "Solapur-Wadi");
        assert_eq!(json["metrics"]["activeTrains"], 2);
        assert_eq!(json["trains"][0]["trainNumber"], "12345");
        assert_eq!(json["trains"][0]["speedKmh"], 80.0);
        assert_eq!(json["decisions"]["12345"]["decisionKind"], "Hold/Reroute");
        assert!(json.get("section").is_none());
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(ReportSnapshot::from_json(b"<html>502 Bad Gateway</html>").is_err());
    }
}
