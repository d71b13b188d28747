//! HTTP surface: the interactions webhook and the maintenance endpoint.

pub mod interactions;
pub mod setup;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::discord::{AuditNotifier, PlatformClient};
use crate::moderation::ActionExecutor;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<dyn PlatformClient>,
    pub executor: Arc<ActionExecutor>,
    pub notifier: Arc<AuditNotifier>,
}

impl AppState {
    pub fn new(config: Config, client: Arc<dyn PlatformClient>) -> Self {
        let executor = ActionExecutor::new(client.clone(), config.moderation.clone());
        let notifier = AuditNotifier::new(client.clone(), config.discord.audit_channel_id);
        Self {
            config: Arc::new(config),
            client,
            executor: Arc::new(executor),
            notifier: Arc::new(notifier),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/interactions", post(interactions::handle_interaction))
        .route("/api/setup", post(setup::handle_setup))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
