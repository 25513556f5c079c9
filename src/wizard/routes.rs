//! REST endpoints for wizard sessions.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use super::dispatcher::WizardEvent;
use super::manager::WizardManager;
use crate::error::WizardError;

/// Shared state for wizard routes.
#[derive(Clone)]
pub struct WizardRouteState {
    pub manager: Arc<WizardManager>,
}

/// POST /api/wizard
///
/// Opens a session on the welcome step.
async fn create_session(State(state): State<WizardRouteState>) -> impl IntoResponse {
    let (id, snapshot) = state.manager.create().await;
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id, "wizard": snapshot })),
    )
}

/// GET /api/wizard/{id}
async fn get_session(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.manager.snapshot(id).await {
        Ok(snapshot) => Json(serde_json::json!({ "id": id, "wizard": snapshot })).into_response(),
        Err(e) => wizard_error_response(e),
    }
}

/// POST /api/wizard/{id}/events
///
/// Applies one screen event. A refused event answers 422 with the step the
/// session is still on and the fields blocking it.
async fn post_event(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(event): Json<WizardEvent>,
) -> Response {
    match state.manager.apply(id, event).await {
        Ok(snapshot) => Json(serde_json::json!({ "id": id, "wizard": snapshot })).into_response(),
        Err(e) => wizard_error_response(e),
    }
}

/// DELETE /api/wizard/{id}
async fn delete_session(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Response {
    if state.manager.remove(id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        wizard_error_response(WizardError::SessionNotFound { id })
    }
}

/// GET /api/wizard/{id}/feed
///
/// The session's browse feed as the browse screen last saw it.
async fn get_feed(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.manager.feed(id).await {
        Ok(feed) => Json(serde_json::json!({ "id": id, "feed": feed.state().await })).into_response(),
        Err(e) => wizard_error_response(e),
    }
}

/// POST /api/wizard/{id}/feed/retry
///
/// Re-issues the session's last browse load. 409 if nothing was loaded yet
/// or a newer load replaced this one.
async fn retry_feed(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Response {
    let feed = match state.manager.feed(id).await {
        Ok(feed) => feed,
        Err(e) => return wizard_error_response(e),
    };
    match feed.retry_state().await {
        Some(Some(applied)) => Json(serde_json::json!({ "id": id, "feed": applied })).into_response(),
        Some(None) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": "Superseded by a newer load", "superseded": true })),
        )
            .into_response(),
        None => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": "Nothing to retry" })),
        )
            .into_response(),
    }
}

fn wizard_error_response(err: WizardError) -> Response {
    let message = err.to_string();
    match err {
        WizardError::SessionNotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response(),
        WizardError::NotAllowed { step, .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": message, "step": step, "missing": [] })),
        )
            .into_response(),
        WizardError::Incomplete { step, missing } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": message, "step": step, "missing": missing })),
        )
            .into_response(),
    }
}

/// Build the wizard REST routes.
pub fn wizard_routes(state: WizardRouteState) -> Router {
    Router::new()
        .route("/api/wizard", post(create_session))
        .route("/api/wizard/{id}", get(get_session).delete(delete_session))
        .route("/api/wizard/{id}/events", post(post_event))
        .route("/api/wizard/{id}/feed", get(get_feed))
        .route("/api/wizard/{id}/feed/retry", post(retry_feed))
        .with_state(state)
}
