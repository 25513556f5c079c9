//! REST endpoints for group chat.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::model::NewMessage;
use super::room::ChatHub;
use crate::error::ChatError;

#[derive(Clone)]
pub struct ChatRouteState {
    pub hub: Arc<ChatHub>,
}

#[derive(Debug, Deserialize)]
struct ReactionRequest {
    emoji: String,
}

fn chat_error_response(err: ChatError) -> Response {
    let status = match err {
        ChatError::EmptyMessage | ChatError::EmptyReaction => StatusCode::UNPROCESSABLE_ENTITY,
        ChatError::GroupNotFound { .. } | ChatError::MessageNotFound { .. } => StatusCode::NOT_FOUND,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// GET /api/groups/{id}/messages
async fn list_messages(State(state): State<ChatRouteState>, Path(group_id): Path<String>) -> Response {
    match state.hub.history(&group_id).await {
        Ok(messages) => Json(serde_json::json!({ "messages": messages })).into_response(),
        Err(e) => chat_error_response(e),
    }
}

/// POST /api/groups/{id}/messages
async fn post_message(
    State(state): State<ChatRouteState>,
    Path(group_id): Path<String>,
    Json(body): Json<NewMessage>,
) -> Response {
    match state.hub.post(&group_id, body).await {
        Ok(message) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "message": message, "notice": "Message sent" })),
        )
            .into_response(),
        Err(e) => chat_error_response(e),
    }
}

/// POST /api/groups/{id}/messages/{message_id}/reactions
async fn add_reaction(
    State(state): State<ChatRouteState>,
    Path((group_id, message_id)): Path<(String, Uuid)>,
    Json(body): Json<ReactionRequest>,
) -> Response {
    match state.hub.react(&group_id, message_id, &body.emoji).await {
        Ok(reactions) => Json(serde_json::json!({
            "message_id": message_id,
            "reactions": reactions,
        }))
        .into_response(),
        Err(e) => chat_error_response(e),
    }
}

/// GET /api/groups/{id}/messages/{message_id}/reply-preview
async fn reply_preview(
    State(state): State<ChatRouteState>,
    Path((group_id, message_id)): Path<(String, Uuid)>,
) -> Response {
    match state.hub.reply_preview(&group_id, message_id).await {
        Ok(preview) => Json(preview).into_response(),
        Err(e) => chat_error_response(e),
    }
}

/// Build the chat REST routes.
pub fn chat_routes(state: ChatRouteState) -> Router {
    Router::new()
        .route("/api/groups/{id}/messages", get(list_messages).post(post_message))
        .route(
            "/api/groups/{id}/messages/{message_id}/reactions",
            post(add_reaction),
        )
        .route(
            "/api/groups/{id}/messages/{message_id}/reply-preview",
            get(reply_preview),
        )
        .with_state(state)
}
