use crate::agent::ChatAgent;
use crate::error::{ChainError, ErrorPayload};
use crate::models::chat::ChatRequest;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::error;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<ChatAgent>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    match state.agent.send_message(&request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ChainError) -> Response {
    let status = err.status_code();
    match err {
        // The provider's error body goes back verbatim; see the completion
        // client for the rationale.
        ChainError::Completion { body, .. } => (status, Json(body)).into_response(),
        other => {
            error!("Chat request failed at stage '{}': {}", other.stage(), other);
            (status, Json(json!({ "error": ErrorPayload::from(&other) }))).into_response()
        }
    }
}
