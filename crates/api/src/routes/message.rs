//! Message Route

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::AppState;

/// Incoming user message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Reply to a user message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub reply: String,
}

/// Answer a user message
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> Json<MessageResponse> {
    let start = std::time::Instant::now();
    let (branch, reply) = state.assistant.respond(&request.text).await;

    info!(
        branch = branch.as_str(),
        latency_ms = start.elapsed().as_millis() as u64,
        "Message answered"
    );

    Json(MessageResponse { reply })
}
