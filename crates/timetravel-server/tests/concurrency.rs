//! Integration tests for concurrent requests against one session.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use timetravel_server::router::build_router;
use timetravel_server::state::AppState;

async fn request_json(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, json)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_saves_are_serialized() {
    let dir = tempfile::tempdir().unwrap();
    let config = timetravel_server::config::ServerConfig {
        db_path: dir.path().join("concurrent.db"),
        ..Default::default()
    };
    let app = build_router(AppState::new(&config));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            request_json(&app, Method::POST, "/playground/save", None).await
        }));
    }

    let mut indices = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK, "save failed: {body}");
        assert_eq!(body["view"]["position"], -1);
        indices.push(body["snapshot"]["index"].as_u64().unwrap());
    }

    // Every save observed a distinct history length.
    indices.sort_unstable();
    assert_eq!(indices, (0..16).collect::<Vec<u64>>());

    let (_, list) = request_json(&app, Method::GET, "/history", None).await;
    assert_eq!(list["total"], 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn navigation_interleaved_with_saves_stays_in_range() {
    let app = build_router(AppState::in_memory());

    let mut handles = Vec::new();
    for i in 0..24 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            match i % 3 {
                0 => request_json(&app, Method::POST, "/playground/save", None).await,
                1 => request_json(&app, Method::POST, "/playground/back", None).await,
                _ => {
                    request_json(
                        &app,
                        Method::POST,
                        "/playground/jump",
                        Some(json!({ "target": i % 5 })),
                    )
                    .await
                }
            }
        }));
    }
    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let (_, view) = request_json(&app, Method::GET, "/playground", None).await;
    let len = view["history_len"].as_i64().unwrap();
    let position = view["position"].as_i64().unwrap();
    assert_eq!(len, 8);
    assert!(position == -1 || (0..len).contains(&position));
}
