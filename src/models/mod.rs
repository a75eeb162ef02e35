//! Data contract of the `/api/live_report` endpoint.

mod decision;
pub(crate) mod helpers;
mod report;
mod train;

pub use decision::{AIDecision, DecisionKind};
pub use helpers::finite_or_zero;
pub use report::{ReportSnapshot, SectionMetrics, StationState};
pub use train::{TrainState, TrainStatus, TrainType};
