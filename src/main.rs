//! Binary entry point: config, tracing, adapters, webhook server.

use std::sync::Arc;
use std::time::Duration;

use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ticket_intake::adapters::http::router;
use ticket_intake::adapters::telegram::{TelegramApi, TelegramApiConfig};
use ticket_intake::adapters::tracker::{MetadataTokenProvider, TrackerApiConfig, TrackerClient};
use ticket_intake::application::{Dispatcher, DispatcherConfig, SessionRegistry};
use ticket_intake::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ticket_intake=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let transport = Arc::new(TelegramApi::new(TelegramApiConfig {
        api_base: config.transport.api_base.clone(),
        bot_token: config.transport.bot_token,
        request_timeout: Duration::from_millis(config.transport.request_timeout_ms),
    })?);

    let tokens = Arc::new(MetadataTokenProvider::new(
        config.tracker.metadata_url.clone(),
        Duration::from_millis(config.tracker.credential_timeout_ms),
    )?);
    let tracker = Arc::new(TrackerClient::new(
        TrackerApiConfig {
            base_url: config.tracker.base_url.clone(),
            user_login: config.tracker.user_login.clone(),
            request_timeout: Duration::from_millis(config.tracker.request_timeout_ms),
        },
        tokens,
    )?);

    let dispatcher = Arc::new(Dispatcher::new(
        SessionRegistry::new(),
        transport,
        tracker,
        DispatcherConfig {
            queue: config.tracker.queue.clone(),
            submitter_login: config.tracker.user_login.clone(),
            browse_base_url: config.tracker.browse_url.clone(),
        },
    ));

    let app = router(dispatcher).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(30))),
    );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, queue = %config.tracker.queue, "ticket-intake listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
