use crate::{
    dashboard::{summarize, DashboardSummary},
    view::{derive_page, TrainPage, ViewQuery},
    AppState,
};

const NOT_READY: &str = "live data is not available";

pub async fn query_trains(state: &AppState, query: ViewQuery) -> Result<TrainPage, String> {
    let snapshot = state.sync.get_snapshot().await;
    let report = snapshot.report.ok_or_else(|| NOT_READY.to_string())?;

    Ok(derive_page(
        &report.trains,
        &report.decisions,
        &query,
        state.section.length_km,
    ))
}

pub async fn get_dashboard_summary(state: &AppState) -> Result<DashboardSummary, String> {
    let snapshot = state.sync.get_snapshot().await;
    let report = snapshot.report.ok_or_else(|| NOT_READY.to_string())?;
    Ok(summarize(&report))
}
