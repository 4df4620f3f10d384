//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the
//! `TICKET_INTAKE` prefix and nested sections use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use ticket_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on {}", config.server.socket_addr());
//! ```

mod error;
mod server;
mod tracker;
mod transport;

pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;
pub use tracker::TrackerConfig;
pub use transport::TransportConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Webhook server (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat transport (bot token, API base).
    pub transport: TransportConfig,

    /// Issue tracker (endpoints, queue, acting user).
    pub tracker: TrackerConfig,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Reads a `.env` file first when present (development), then
    /// environment variables shaped like
    /// `TICKET_INTAKE__TRACKER__QUEUE=CRMTEAM`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when required variables are missing or
    /// values cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TICKET_INTAKE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of all sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.transport.validate()?;
        self.tracker.validate()?;
        Ok(())
    }
}
