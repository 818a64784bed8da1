//! Router assembly: HTTP endpoints, WebSocket upgrade, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers), adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/session", post(http::http_create_session))
        .route("/api/v1/session/:id", get(http::http_get_session).delete(http::http_delete_session))
        .route("/api/v1/session/:id/answer", post(http::http_post_answer))
        .route("/api/v1/session/:id/skip", post(http::http_post_skip))
        .route("/api/v1/session/:id/next", post(http::http_post_next))
        .route("/api/v1/session/:id/adaptive", post(http::http_post_adaptive))
        .route("/api/v1/session/:id/diagnostic", post(http::http_post_diagnostic))
        .route("/api/v1/session/:id/hint", get(http::http_get_hint))
        .route("/api/v1/session/:id/diagram", get(http::http_get_diagram))
        .route("/api/v1/lesson", get(http::http_get_lesson))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::*;
    use crate::config::TutorConfig;

    fn app() -> Router {
        let cfg = TutorConfig { rng_seed: Some(3), ..Default::default() };
        build_router(Arc::new(AppState::from_config(cfg, "./does-not-exist".into())))
    }

    async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let req = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => req
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = call(&app(), Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn new_session_starts_in_diagnostic_without_leaking_answer() {
        let (status, body) = call(&app(), Method::POST, "/api/v1/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "diagnostic");
        assert_eq!(body["diagnostic"]["total"], 12);
        assert_eq!(body["answered"], false);
        assert!(body["problem"]["promptText"].as_str().unwrap().starts_with("Find the area of"));
        assert!(body["problem"].get("expectedArea").is_none());
        assert_eq!(body["mastery"].as_array().unwrap().len(), 6);
        assert_eq!(body["mastery"][0]["band"], "low");
    }

    #[tokio::test]
    async fn answer_and_skip_drive_the_session() {
        let router = app();
        let (_, created) = call(&router, Method::POST, "/api/v1/session", None).await;
        let id = created["sessionId"].as_str().unwrap().to_string();

        let (status, body) = call(
            &router,
            Method::POST,
            &format!("/api/v1/session/{id}/answer"),
            Some(serde_json::json!({ "answer": "not a number" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["feedback"], "⚠️ Please enter a valid number.");
        assert_eq!(body["answered"], false);

        let (_, body) = call(&router, Method::POST, &format!("/api/v1/session/{id}/skip"), None).await;
        assert_eq!(body["diagnostic"]["position"], 1);

        let (status, _) = call(&router, Method::POST, &format!("/api/v1/session/{id}/adaptive"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn next_requires_an_answer_first() {
        let router = app();
        let (_, created) = call(&router, Method::POST, "/api/v1/session", None).await;
        let id = created["sessionId"].as_str().unwrap().to_string();

        let (status, body) = call(&router, Method::POST, &format!("/api/v1/session/{id}/next"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].is_string());

        let (_, body) = call(
            &router,
            Method::POST,
            &format!("/api/v1/session/{id}/answer"),
            Some(serde_json::json!({ "answer": "0" })),
        )
        .await;
        assert_eq!(body["actions"]["next"], true);
        let (status, body) = call(&router, Method::POST, &format!("/api/v1/session/{id}/next"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["diagnostic"]["position"], 1);
    }

    #[tokio::test]
    async fn deleted_session_is_gone() {
        let router = app();
        let (_, created) = call(&router, Method::POST, "/api/v1/session", None).await;
        let id = created["sessionId"].as_str().unwrap().to_string();

        let (status, _) = call(&router, Method::DELETE, &format!("/api/v1/session/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&router, Method::GET, &format!("/api/v1/session/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&router, Method::DELETE, &format!("/api/v1/session/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn diagram_degrades_to_placeholder() {
        let router = app();
        let (_, created) = call(&router, Method::POST, "/api/v1/session", None).await;
        let id = created["sessionId"].as_str().unwrap().to_string();
        let (status, body) = call(&router, Method::GET, &format!("/api/v1/session/{id}/diagram"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "placeholder");
        assert_eq!(body["content"], "Diagram not available.");
    }

    #[tokio::test]
    async fn unknown_session_and_shape_map_to_status_codes() {
        let router = app();
        let (status, body) = call(&router, Method::GET, "/api/v1/session/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("unknown session"));

        let (status, _) = call(&router, Method::GET, "/api/v1/lesson?shape=hexagon", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&router, Method::GET, "/api/v1/lesson?shape=trapezium", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["shape"], "trapezium");
        assert_eq!(body["formula_text"], "Area = ½ × (a + b) × height");
    }

    #[tokio::test]
    async fn ws_messages_dispatch_to_logic() {
        let cfg = TutorConfig { rng_seed: Some(3), ..Default::default() };
        let state = AppState::from_config(cfg, "./does-not-exist".into());
        let msg: crate::protocol::ClientWsMessage = serde_json::from_str(r#"{"type":"new_session"}"#).unwrap();
        let reply = serde_json::to_value(ws::handle_client_ws(msg, &state).await).unwrap();
        assert_eq!(reply["type"], "session");
        let id = reply["session"]["sessionId"].as_str().unwrap();

        let msg = serde_json::from_str(&format!(r#"{{"type":"check_answer","sessionId":"{id}","answer":"-1"}}"#)).unwrap();
        let reply = serde_json::to_value(ws::handle_client_ws(msg, &state).await).unwrap();
        assert_eq!(reply["session"]["answered"], true);
        assert_eq!(reply["session"]["feedback"], "❌ Incorrect.");

        let msg = serde_json::from_str(r#"{"type":"lesson","shape":"pentagon"}"#).unwrap();
        let reply = serde_json::to_value(ws::handle_client_ws(msg, &state).await).unwrap();
        assert_eq!(reply["type"], "error");

        let msg = serde_json::from_str(&format!(r#"{{"type":"end_session","sessionId":"{id}"}}"#)).unwrap();
        let reply = serde_json::to_value(ws::handle_client_ws(msg, &state).await).unwrap();
        assert_eq!(reply["type"], "session_ended");
        assert_eq!(reply["sessionId"], id);
        assert!(!state.sessions.read().await.contains_key(id));
    }
}
