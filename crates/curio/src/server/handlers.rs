use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;
use tracing::{error, info};

use crate::chat::{ChatReply, ChatRequest};
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Health check endpoint - returns JSON status
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /api/chat`: run one conversation turn
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        error!("Error processing chat message: invalid request body: {e}");
        ApiError::ProcessingFailed
    })?;

    let Some(orchestrator) = state.orchestrator.as_ref() else {
        error!("Completion API key not configured");
        return Err(ApiError::NotConfigured);
    };

    info!(
        history_len = request.conversation_history.len(),
        "Processing chat message"
    );

    let reply = orchestrator
        .process(&request.message, &request.conversation_history)
        .await
        .map_err(|e| {
            error!("Error processing chat message: {e}");
            ApiError::ProcessingFailed
        })?;

    Ok(Json(reply))
}
