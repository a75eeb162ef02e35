use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::models::ReportSnapshot;

use super::mapper::{
    bottleneck_spans, merge_track_items, on_track_trains, station_item, train_item, TrackItem,
    TrackSpan,
};
use super::section::{SectionEndpoint, SectionLayout};

/// Widths below this render the compact, list-style track.
pub const WIDE_MIN_WIDTH_PX: u32 = 768;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Breakpoint {
    Compact,
    Wide,
}

impl Breakpoint {
    pub fn for_width(width_px: u32) -> Self {
        if width_px < WIDE_MIN_WIDTH_PX {
            Breakpoint::Compact
        } else {
            Breakpoint::Wide
        }
    }
}

/// Answers "how wide is the screen right now" for the renderer.
pub trait BreakpointProvider: Send + Sync {
    fn current(&self) -> Breakpoint;
}

pub struct FixedBreakpoint(pub Breakpoint);

impl BreakpointProvider for FixedBreakpoint {
    fn current(&self) -> Breakpoint {
        self.0
    }
}

/// Last viewport width pushed by the renderer on resize.
pub struct ViewportWidth(AtomicU32);

impl ViewportWidth {
    pub fn new(width_px: u32) -> Self {
        Self(AtomicU32::new(width_px))
    }

    pub fn set(&self, width_px: u32) {
        self.0.store(width_px, Ordering::Relaxed);
    }
}

impl BreakpointProvider for ViewportWidth {
    fn current(&self) -> Breakpoint {
        Breakpoint::for_width(self.0.load(Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum TrackLayout {
    /// Markers placed absolutely along one horizontal line.
    Wide {
        stations: Vec<TrackItem>,
        trains: Vec<TrackItem>,
    },
    /// One ordered list, stations and trains interleaved by kilometre.
    Compact { items: Vec<TrackItem> },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackView {
    pub start: SectionEndpoint,
    pub end: SectionEndpoint,
    pub bottlenecks: Vec<TrackSpan>,
    pub layout: TrackLayout,
}

pub fn track_view(
    report: &ReportSnapshot,
    section: &SectionLayout,
    breakpoint: Breakpoint,
) -> TrackView {
    let layout = match breakpoint {
        Breakpoint::Wide => TrackLayout::Wide {
            stations: report
                .stations
                .iter()
                .map(|station| station_item(station, section))
                .collect(),
            trains: on_track_trains(&report.trains)
                .map(|train| train_item(train, section))
                .collect(),
        },
        Breakpoint::Compact => TrackLayout::Compact {
            items: merge_track_items(&report.trains, &report.stations, section),
        },
    };

    TrackView {
        start: section.start,
        end: section.end,
        bottlenecks: bottleneck_spans(section),
        layout,
    }
}
