use std::cmp::Ordering;

use anyhow::{bail, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionEndpoint {
    pub code: &'static str,
    pub name: &'static str,
}

/// A single-track stretch overlaid on the live view.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BottleneckSegment {
    pub start_km: f64,
    pub end_km: f64,
    pub name: &'static str,
}

/// Static reference data of the monitored line.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionLayout {
    pub name: &'static str,
    pub length_km: f64,
    /// Kilometre zero.
    pub start: SectionEndpoint,
    /// Kilometre `length_km`.
    pub end: SectionEndpoint,
    pub bottlenecks: &'static [BottleneckSegment],
}

pub const SOLAPUR_WADI: SectionLayout = SectionLayout {
    name: "Solapur-Wadi",
    length_km: 455.3,
    start: SectionEndpoint {
        code: "SUR",
        name: "Solapur",
    },
    end: SectionEndpoint {
        code: "WDI",
        name: "Wadi",
    },
    bottlenecks: &[
        BottleneckSegment {
            start_km: 25.3,
            end_km: 45.8,
            name: "Hotgi-Indi",
        },
        BottleneckSegment {
            start_km: 142.3,
            end_km: 168.9,
            name: "Badami-Gadag",
        },
        BottleneckSegment {
            start_km: 325.2,
            end_km: 345.7,
            name: "Alnavar-Londa",
        },
    ],
};

impl Default for SectionLayout {
    fn default() -> Self {
        SOLAPUR_WADI
    }
}

impl SectionLayout {
    pub fn validate(&self) -> Result<()> {
        if !self.length_km.is_finite() || self.length_km <= 0.0 {
            bail!("section {} has invalid length {}", self.name, self.length_km);
        }

        for segment in self.bottlenecks {
            if segment.start_km.partial_cmp(&segment.end_km) != Some(Ordering::Less) {
                bail!(
                    "bottleneck {} must start before it ends ({} >= {})",
                    segment.name,
                    segment.start_km,
                    segment.end_km
                );
            }
            if segment.start_km < 0.0 || segment.end_km > self.length_km {
                bail!(
                    "bottleneck {} lies outside the section (0..{} km)",
                    segment.name,
                    self.length_km
                );
            }
        }

        Ok(())
    }
}
