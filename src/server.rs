//! HTTP surface: merges the per-module routers behind one CORS layer.

use std::sync::Arc;
use std::time::Duration;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::browse::{browse_routes, BrowseRouteState};
use crate::catalog::catalog_routes;
use crate::chat::{chat_routes, ChatHub, ChatRouteState};
use crate::directory::Directory;
use crate::wizard::{wizard_routes, WizardManager, WizardRouteState};

/// Everything the routers share for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn Directory>,
    pub wizard: Arc<WizardManager>,
    pub chat: Arc<ChatHub>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(directory: Arc<dyn Directory>, request_timeout: Duration) -> Self {
        Self {
            wizard: Arc::new(WizardManager::new(directory.clone(), request_timeout)),
            directory,
            chat: Arc::new(ChatHub::new()),
            request_timeout,
        }
    }

    /// Open a chat room for every public group in the directory.
    ///
    /// Returns the number of rooms opened. A failing directory leaves the
    /// hub empty; the server still starts.
    pub async fn open_group_rooms(&self) -> usize {
        match self.directory.list_groups().await {
            Ok(groups) => {
                for group in &groups {
                    self.chat.open_room(&group.id).await;
                }
                info!(rooms = groups.len(), "Chat rooms opened");
                groups.len()
            }
            Err(e) => {
                warn!(error = %e, "Could not load groups, chat starts without rooms");
                0
            }
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "connect-pulse"
    }))
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(wizard_routes(WizardRouteState {
            manager: state.wizard.clone(),
        }))
        .merge(browse_routes(BrowseRouteState {
            directory: state.directory.clone(),
            request_timeout: state.request_timeout,
            sessions: state.wizard.clone(),
        }))
        .merge(chat_routes(ChatRouteState {
            hub: state.chat.clone(),
        }))
        .merge(catalog_routes())
        .layer(CorsLayer::permissive())
}
