//! Router assembly for the timetravel HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Editor session
        .route("/playground", get(handlers::playground::get_view))
        .route("/playground/draft", put(handlers::playground::edit_draft))
        .route("/playground/save", post(handlers::playground::save))
        .route("/playground/clear", post(handlers::playground::clear))
        .route("/playground/back", post(handlers::playground::go_back))
        .route(
            "/playground/forward",
            post(handlers::playground::go_forward),
        )
        .route("/playground/jump", post(handlers::playground::jump))
        .route("/playground/reload", post(handlers::playground::reload))
        // History
        .route("/history", get(handlers::history::list_history))
        .route("/history/{index}", get(handlers::history::get_snapshot))
        .route("/timeline", get(handlers::history::timeline))
        // Diff viewer
        .route(
            "/diff",
            get(handlers::diff::get_diff)
                .post(handlers::diff::open_diff)
                .delete(handlers::diff::close_diff),
        )
        .route("/diff/previous", post(handlers::diff::previous))
        .route("/diff/next", post(handlers::diff::next))
        .route(
            "/diff/changes/previous",
            post(handlers::diff::previous_change),
        )
        .route("/diff/changes/next", post(handlers::diff::next_change))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
