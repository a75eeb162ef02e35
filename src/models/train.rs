use serde::{Deserialize, Serialize};

use super::helpers::{null_as_default, whole_minutes};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrainStatus {
    Scheduled,
    Running,
    Delayed,
    Stopped,
    Completed,
}

impl TrainStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainStatus::Scheduled => "scheduled",
            TrainStatus::Running => "running",
            TrainStatus::Delayed => "delayed",
            TrainStatus::Stopped => "stopped",
            TrainStatus::Completed => "completed",
        }
    }

    /// Scheduled and completed trains have no live position on the section.
    pub fn is_on_track(&self) -> bool {
        !matches!(self, TrainStatus::Scheduled | TrainStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrainType {
    #[default]
    Passenger,
    Freight,
}

/// One train as reported by the upstream simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct TrainState {
    pub train_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub train_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub train_type: TrainType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_km: f64,
    #[serde(
        rename(deserialize = "speed"),
        alias = "speed_kmh",
        default,
        deserialize_with = "null_as_default"
    )]
    pub speed_kmh: f64,
    /// Negative values mean the train is running early.
    #[serde(default, deserialize_with = "whole_minutes")]
    pub delay_minutes: i64,
    pub status: TrainStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_names() {
        let train: TrainState = serde_json::from_str(
            r#"{
                "train_number": "12345",
                "train_name": "Udyan Express",
                "train_type": "freight",
                "origin": "WDI",
                "destination": "SUR",
                "current_km": 120.5,
                "speed": 64.0,
                "delay_minutes": -3,
                "status": "running"
            }"#,
        )
        .unwrap();

        assert_eq!(train.train_type, TrainType::Freight);
        assert_eq!(train.speed_kmh, 64.0);
        assert_eq!(train.delay_minutes, -3);
        assert_eq!(train.status, TrainStatus::Running);
    }

    #[test]
    fn missing_and_null_numbers_become_zero() {
        let train: TrainState = serde_json::from_str(
            r#"{"train_number": "1", "speed": null, "delay_minutes": null, "status": "stopped"}"#,
        )
        .unwrap();

        assert_eq!(train.current_km, 0.0);
        assert_eq!(train.speed_kmh, 0.0);
        assert_eq!(train.delay_minutes, 0);
        assert_eq!(train.train_type, TrainType::Passenger);
    }

    #[test]
    fn fractional_delay_rounds_to_whole_minutes() {
        let train: TrainState =
            serde_json::from_str(r#"{"train_number": "1", "delay_minutes": 7.6, "status": "delayed"}"#)
                .unwrap();
        assert_eq!(train.delay_minutes, 8);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result: Result<TrainState, _> =
            serde_json::from_str(r#"{"train_number": "1", "status": "teleported"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn scheduled_and_completed_are_off_track() {
        assert!(!TrainStatus::Scheduled.is_on_track());
        assert!(!TrainStatus::Completed.is_on_track());
        assert!(TrainStatus::Running.is_on_track());
        assert!(TrainStatus::Delayed.is_on_track());
        assert!(TrainStatus::Stopped.is_on_track());
    }
}
