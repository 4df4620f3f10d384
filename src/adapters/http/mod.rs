//! HTTP adapter - the inbound webhook surface.

mod handlers;
mod routes;

pub use routes::{router, AppState};
