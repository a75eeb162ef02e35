pub mod commands;
pub mod layout;
pub mod mapper;
pub mod section;

pub use layout::{
    track_view, Breakpoint, BreakpointProvider, FixedBreakpoint, TrackLayout, TrackView,
    ViewportWidth,
};
pub use mapper::{
    bottleneck_spans, merge_track_items, normalized_position, orientation, Orientation,
    TrackEntity, TrackItem, TrackSpan,
};
pub use section::{BottleneckSegment, SectionEndpoint, SectionLayout, SOLAPUR_WADI};
