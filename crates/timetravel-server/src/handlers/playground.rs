//! Editor, save and navigation handlers.

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::schema::playground::{EditRequest, JumpRequest, PlaygroundView, SaveResponse};
use crate::state::AppState;

/// Returns the current view.
///
/// `GET /playground`
pub async fn get_view(State(state): State<AppState>) -> Json<PlaygroundView> {
    let service = state.service.lock().await;
    Json(service.view())
}

/// Records an editor change.
///
/// `PUT /playground/draft`
pub async fn edit_draft(
    State(state): State<AppState>,
    Json(req): Json<EditRequest>,
) -> Json<PlaygroundView> {
    let mut service = state.service.lock().await;
    Json(service.edit(req.text))
}

/// Saves the live draft as a snapshot.
///
/// `POST /playground/save`
pub async fn save(State(state): State<AppState>) -> Result<Json<SaveResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let response = service.save()?;
    Ok(Json(response))
}

/// Deletes every snapshot.
///
/// `POST /playground/clear`
pub async fn clear(State(state): State<AppState>) -> Result<Json<PlaygroundView>, ApiError> {
    let mut service = state.service.lock().await;
    let view = service.clear()?;
    Ok(Json(view))
}

/// `POST /playground/back`
pub async fn go_back(State(state): State<AppState>) -> Json<PlaygroundView> {
    let mut service = state.service.lock().await;
    Json(service.back())
}

/// `POST /playground/forward`
pub async fn go_forward(State(state): State<AppState>) -> Json<PlaygroundView> {
    let mut service = state.service.lock().await;
    Json(service.forward())
}

/// Jumps to a slider value. Unusable targets are ignored.
///
/// `POST /playground/jump`
pub async fn jump(
    State(state): State<AppState>,
    Json(req): Json<JumpRequest>,
) -> Json<PlaygroundView> {
    let mut service = state.service.lock().await;
    Json(service.jump(&req.target))
}

/// Reloads the history from the store.
///
/// `POST /playground/reload`
pub async fn reload(State(state): State<AppState>) -> Result<Json<PlaygroundView>, ApiError> {
    let mut service = state.service.lock().await;
    let view = service.initialize()?;
    Ok(Json(view))
}
