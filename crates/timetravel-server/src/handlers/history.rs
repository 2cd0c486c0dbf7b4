//! Snapshot listing and slider handlers.

use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::schema::history::{ListHistoryResponse, SnapshotDetail, TimelineResponse};
use crate::state::AppState;

/// Lists every snapshot, oldest first.
///
/// `GET /history`
pub async fn list_history(State(state): State<AppState>) -> Json<ListHistoryResponse> {
    let service = state.service.lock().await;
    Json(service.snapshots())
}

/// Returns one snapshot with its code.
///
/// `GET /history/{index}`
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SnapshotDetail>, ApiError> {
    let service = state.service.lock().await;
    let detail = service.snapshot(index)?;
    Ok(Json(detail))
}

/// `GET /timeline`
pub async fn timeline(State(state): State<AppState>) -> Json<TimelineResponse> {
    let service = state.service.lock().await;
    Json(service.timeline_marks())
}
