use serde::{Deserialize, Serialize};

use super::helpers::null_as_default;

/// Recommendation categories produced by the upstream decision service.
///
/// The wire carries human-readable labels; anything unrecognised maps to
/// [`DecisionKind::Unknown`] instead of failing the whole report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum DecisionKind {
    ProceedNormally,
    ReduceSpeed,
    StopAtNextStation,
    GivePriority,
    HoldOrReroute,
    #[default]
    Unknown,
}

impl DecisionKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Proceed normally" => DecisionKind::ProceedNormally,
            "Reduce speed" => DecisionKind::ReduceSpeed,
            "Stop at next station" => DecisionKind::StopAtNextStation,
            "Give priority" => DecisionKind::GivePriority,
            "Hold/Reroute" => DecisionKind::HoldOrReroute,
            _ => DecisionKind::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DecisionKind::ProceedNormally => "Proceed normally",
            DecisionKind::ReduceSpeed => "Reduce speed",
            DecisionKind::StopAtNextStation => "Stop at next station",
            DecisionKind::GivePriority => "Give priority",
            DecisionKind::HoldOrReroute => "Hold/Reroute",
            DecisionKind::Unknown => "Unknown",
        }
    }

    /// Anything other than "proceed normally" needs an operator's attention.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            DecisionKind::ReduceSpeed
                | DecisionKind::StopAtNextStation
                | DecisionKind::GivePriority
                | DecisionKind::HoldOrReroute
        )
    }
}

impl From<String> for DecisionKind {
    fn from(label: String) -> Self {
        DecisionKind::from_label(&label)
    }
}

impl From<DecisionKind> for String {
    fn from(kind: DecisionKind) -> Self {
        kind.label().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AIDecision {
    #[serde(
        rename(serialize = "decisionKind", deserialize = "decision"),
        default,
        deserialize_with = "null_as_default"
    )]
    pub kind: DecisionKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasoning: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
}

impl AIDecision {
    /// Confidence as a whole percentage, clamped to 0..=100.
    pub fn confidence_percent(&self) -> u8 {
        if !self.confidence.is_finite() {
            return 0;
        }
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_to_kinds() {
        assert_eq!(DecisionKind::from_label("Hold/Reroute"), DecisionKind::HoldOrReroute);
        assert_eq!(
            DecisionKind::from_label("Stop at next station"),
            DecisionKind::StopAtNextStation
        );
        assert_eq!(DecisionKind::from_label("Slow down a bit"), DecisionKind::Unknown);
    }

    #[test]
    fn only_non_proceed_kinds_are_critical() {
        assert!(!DecisionKind::ProceedNormally.is_critical());
        assert!(!DecisionKind::Unknown.is_critical());
        assert!(DecisionKind::ReduceSpeed.is_critical());
        assert!(DecisionKind::StopAtNextStation.is_critical());
        assert!(DecisionKind::GivePriority.is_critical());
        assert!(DecisionKind::HoldOrReroute.is_critical());
    }

    #[test]
    fn decodes_decision_payload() {
        let decision: AIDecision = serde_json::from_str(
            r#"{"decision": "Give priority", "reasoning": "Express behind freight", "confidence": 0.874}"#,
        )
        .unwrap();

        assert_eq!(decision.kind, DecisionKind::GivePriority);
        assert_eq!(decision.confidence_percent(), 87);
    }

    #[test]
    fn missing_decision_label_is_unknown() {
        let decision: AIDecision = serde_json::from_str(r#"{"reasoning": "n/a"}"#).unwrap();
        assert_eq!(decision.kind, DecisionKind::Unknown);
        assert_eq!(decision.confidence, 0.0);
    }
}
