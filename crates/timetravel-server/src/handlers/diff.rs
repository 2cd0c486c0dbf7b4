//! Diff viewer handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::schema::diff::{CloseDiffResponse, DiffView};
use crate::state::AppState;

/// Optional snapshot pair for `POST /diff`.
#[derive(Debug, Default, Deserialize)]
pub struct OpenDiffQuery {
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// `GET /diff`
pub async fn get_diff(State(state): State<AppState>) -> Result<Json<DiffView>, ApiError> {
    let service = state.service.lock().await;
    let view = service.diff_view()?;
    Ok(Json(view))
}

/// Opens the viewer. Without a query it compares the newest snapshot with
/// the live draft; `?left=i&right=j` compares two snapshots.
///
/// `POST /diff`
pub async fn open_diff(
    State(state): State<AppState>,
    Query(query): Query<OpenDiffQuery>,
) -> Result<Json<DiffView>, ApiError> {
    let mut service = state.service.lock().await;
    let view = match (query.left, query.right) {
        (None, None) => service.open_diff()?,
        (Some(left), Some(right)) => service.open_diff_between(left, right)?,
        _ => {
            let message = "left and right must be given together";
            return Err(ApiError::BadRequest(message.to_string()));
        }
    };
    Ok(Json(view))
}

/// `DELETE /diff`
pub async fn close_diff(State(state): State<AppState>) -> Json<CloseDiffResponse> {
    let mut service = state.service.lock().await;
    Json(CloseDiffResponse {
        closed: service.close_diff(),
    })
}

/// `POST /diff/previous`
pub async fn previous(State(state): State<AppState>) -> Result<Json<DiffView>, ApiError> {
    let mut service = state.service.lock().await;
    let view = service.diff_previous()?;
    Ok(Json(view))
}

/// `POST /diff/next`
pub async fn next(State(state): State<AppState>) -> Result<Json<DiffView>, ApiError> {
    let mut service = state.service.lock().await;
    let view = service.diff_next()?;
    Ok(Json(view))
}

/// `POST /diff/changes/previous`
pub async fn previous_change(State(state): State<AppState>) -> Result<Json<DiffView>, ApiError> {
    let mut service = state.service.lock().await;
    let view = service.diff_previous_change()?;
    Ok(Json(view))
}

/// `POST /diff/changes/next`
pub async fn next_change(State(state): State<AppState>) -> Result<Json<DiffView>, ApiError> {
    let mut service = state.service.lock().await;
    let view = service.diff_next_change()?;
    Ok(Json(view))
}
