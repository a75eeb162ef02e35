use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{AIDecision, TrainState, TrainStatus};
use crate::track::normalized_position;

use super::query::{total_pages, SortDirection, SortKey, StatusFilter, ViewQuery, PAGE_SIZE};

/// Delays above this many minutes are highlighted as late.
pub const LATE_THRESHOLD_MINUTES: i64 = 15;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainRow {
    pub train: TrainState,
    /// `None` renders as "no recommendation".
    pub decision: Option<AIDecision>,
    pub is_critical: bool,
    pub progress_percent: f64,
    pub is_late: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainPage {
    pub rows: Vec<TrainRow>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

pub fn is_critical(train: &TrainState, decisions: &BTreeMap<String, AIDecision>) -> bool {
    decisions
        .get(&train.train_number)
        .is_some_and(|decision| decision.kind.is_critical())
}

pub fn matches_status(
    train: &TrainState,
    decisions: &BTreeMap<String, AIDecision>,
    filter: StatusFilter,
) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Running => train.status == TrainStatus::Running,
        StatusFilter::Delayed => train.status == TrainStatus::Delayed,
        StatusFilter::Stopped => train.status == TrainStatus::Stopped,
        StatusFilter::Critical => is_critical(train, decisions),
    }
}

/// `needle` must already be lowercase.
fn matches_search(train: &TrainState, needle: &str) -> bool {
    needle.is_empty()
        || train.train_number.to_lowercase().contains(needle)
        || train.train_name.to_lowercase().contains(needle)
}

/// NaN sorts below every number.
fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Ascending order on `key`.
pub fn compare_trains(a: &TrainState, b: &TrainState, key: SortKey) -> Ordering {
    match key {
        SortKey::TrainNumber => a.train_number.cmp(&b.train_number),
        SortKey::TrainName => a.train_name.cmp(&b.train_name),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        SortKey::DelayMinutes => a.delay_minutes.cmp(&b.delay_minutes),
        SortKey::CurrentKm => compare_numbers(a.current_km, b.current_km),
        SortKey::SpeedKmh => compare_numbers(a.speed_kmh, b.speed_kmh),
    }
}

/// Filter, search and stable sort over the whole collection, before paging.
pub fn filter_and_sort<'a>(
    trains: &'a [TrainState],
    decisions: &BTreeMap<String, AIDecision>,
    query: &ViewQuery,
) -> Vec<&'a TrainState> {
    let needle = query.search_term.to_lowercase();

    let mut visible: Vec<&TrainState> = trains
        .iter()
        .filter(|train| matches_status(train, decisions, query.status_filter))
        .filter(|train| matches_search(train, &needle))
        .collect();

    visible.sort_by(|a, b| {
        let ordering = compare_trains(a, b, query.sort_key);
        match query.sort_direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    visible
}

fn build_row(
    train: &TrainState,
    decisions: &BTreeMap<String, AIDecision>,
    section_length_km: f64,
) -> TrainRow {
    let decision = decisions.get(&train.train_number).cloned();
    TrainRow {
        is_critical: decision
            .as_ref()
            .is_some_and(|decision| decision.kind.is_critical()),
        progress_percent: normalized_position(train.current_km, section_length_km) * 100.0,
        is_late: train.delay_minutes > LATE_THRESHOLD_MINUTES,
        train: train.clone(),
        decision,
    }
}

/// The visible page for `query`. The caller keeps `query.page` within
/// `1..=total_pages`; a page past the end comes back empty.
pub fn derive_page(
    trains: &[TrainState],
    decisions: &BTreeMap<String, AIDecision>,
    query: &ViewQuery,
    section_length_km: f64,
) -> TrainPage {
    let visible = filter_and_sort(trains, decisions, query);
    let total_matches = visible.len();

    let start = query.page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    let rows = visible
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|train| build_row(train, decisions, section_length_km))
        .collect();

    TrainPage {
        rows,
        page: query.page,
        total_pages: total_pages(total_matches),
        total_matches,
    }
}
