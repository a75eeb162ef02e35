pub mod commands;
pub mod engine;
pub mod query;

pub use engine::{
    compare_trains, derive_page, filter_and_sort, is_critical, matches_status, TrainPage,
    TrainRow, LATE_THRESHOLD_MINUTES,
};
pub use query::{
    clamp_page, total_pages, SortDirection, SortKey, StatusFilter, ViewQuery, PAGE_SIZE,
};
