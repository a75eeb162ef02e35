use crate::{
    sync::{SyncController, SyncSnapshot},
    AppState,
};

fn controller_from_state(state: &AppState) -> SyncController {
    state.sync.clone()
}

pub async fn get_sync_state(state: &AppState) -> Result<SyncSnapshot, String> {
    let controller = controller_from_state(state);
    Ok(controller.get_snapshot().await)
}

pub async fn retry_sync(state: &AppState) -> Result<SyncSnapshot, String> {
    let controller = controller_from_state(state);
    Ok(controller.retry().await)
}
