//! Route table for the webhook surface.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::application::Dispatcher;

use super::handlers;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Builds the application router.
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/webhook", post(handlers::webhook))
        .with_state(AppState { dispatcher })
}
