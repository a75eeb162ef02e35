use crate::{
    track::{track_view, TrackView},
    AppState,
};

pub async fn get_track_view(state: &AppState) -> Result<TrackView, String> {
    let snapshot = state.sync.get_snapshot().await;
    let report = snapshot
        .report
        .ok_or_else(|| "live data is not available".to_string())?;

    Ok(track_view(&report, &state.section, state.breakpoint.current()))
}
