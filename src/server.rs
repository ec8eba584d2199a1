//! HTTP transport — `POST /chat` and `GET /health`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::agent::{ChatRequest, ChatService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

/// Build the Axum router for the Turn API.
pub fn routes(chat: Arc<ChatService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat_handler))
        .layer(CorsLayer::permissive())
        .with_state(AppState { chat })
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "scam-pot"
    }))
}

async fn chat_handler(State(state): State<AppState>, Json(body): Json<ChatRequest>) -> Response {
    let session_id = body.session_id.clone();
    match state.chat.chat(body).await {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => {
            error!(session_id = %session_id, error = %e, "Turn failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}
