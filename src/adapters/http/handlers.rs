//! Webhook request handlers.

use axum::extract::State;
use axum::Json;
use http::StatusCode;

use crate::adapters::telegram::Update;

use super::routes::AppState;

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// Receives one transport update and feeds it through the dispatcher.
///
/// Updates that carry no usable event (service messages, unparseable
/// callbacks) are acknowledged and dropped; answering non-2xx would only
/// make the transport redeliver them.
pub async fn webhook(State(state): State<AppState>, Json(update): Json<Update>) -> StatusCode {
    match update.into_event() {
        Some((chat, event)) => {
            tracing::debug!(%chat, "webhook update received");
            state.dispatcher.dispatch(chat, event).await;
            StatusCode::OK
        }
        None => {
            tracing::debug!("webhook update carried no event");
            StatusCode::OK
        }
    }
}
