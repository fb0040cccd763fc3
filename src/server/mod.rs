//! HTTP server for the recipe bot.
//!
//! Accepts webhook deliveries from GitHub, validates their signatures, and
//! feeds each one through the event router. Each delivery is processed
//! inside its own connection task before the response is sent.
//!
//! # Endpoints
//!
//! - `POST /webhook` - Accepts GitHub webhook deliveries (returns 202 Accepted)
//! - `GET /health` - Returns 200 if the server is running

use std::sync::Arc;

pub mod health;
pub mod signature;
pub mod webhook;

pub use health::health_handler;
pub use signature::{
    compute_signature, format_signature_header, parse_signature_header, verify_signature,
};
pub use webhook::webhook_handler;

use crate::events::{EventContext, EventRouter};

/// Shared application state, passed to handlers via Axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// The fully registered event router.
    router: EventRouter,

    /// Gateway and scheduler handed to every event handler.
    context: EventContext,

    /// Webhook secret for HMAC-SHA256 signature verification.
    webhook_secret: Vec<u8>,
}

impl AppState {
    pub fn new(
        router: EventRouter,
        context: EventContext,
        webhook_secret: impl Into<Vec<u8>>,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                router,
                context,
                webhook_secret: webhook_secret.into(),
            }),
        }
    }

    pub fn router(&self) -> &EventRouter {
        &self.inner.router
    }

    pub fn context(&self) -> &EventContext {
        &self.inner.context
    }

    pub fn webhook_secret(&self) -> &[u8] {
        &self.inner.webhook_secret
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
