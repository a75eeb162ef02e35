//! Header and metric-card values shown above the track and table.

use serde::Serialize;

use crate::models::{ReportSnapshot, SectionMetrics};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub unit: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub section_name: String,
    pub last_updated: String,
    pub metrics: Vec<MetricCard>,
}

/// Falls back to the raw upstream text when the timestamp does not parse.
pub fn format_last_updated(report: &ReportSnapshot) -> String {
    report
        .generated_at()
        .map(|generated| generated.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| report.timestamp.clone())
}

pub fn metric_cards(metrics: &SectionMetrics) -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "Active Trains",
            value: metrics.active_trains.to_string(),
            unit: "",
        },
        MetricCard {
            title: "Average Delay",
            value: metrics.average_delay_minutes.to_string(),
            unit: "min",
        },
        MetricCard {
            title: "Average Speed",
            value: metrics.average_speed_kmh.to_string(),
            unit: "km/h",
        },
        MetricCard {
            title: "Bottleneck Usage",
            value: format!("{:.0}%", metrics.bottleneck_utilization * 100.0),
            unit: "",
        },
        MetricCard {
            title: "Total Scheduled",
            value: metrics.total_scheduled_trains.to_string(),
            unit: "trains",
        },
    ]
}

pub fn summarize(report: &ReportSnapshot) -> DashboardSummary {
    DashboardSummary {
        section_name: report.section_name.clone(),
        last_updated: format_last_updated(report),
        metrics: metric_cards(&report.metrics),
    }
}
