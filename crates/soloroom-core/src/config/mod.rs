//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod admin;
pub mod app;
pub mod lease;
pub mod logging;
pub mod rate_limit;
pub mod store;

use serde::{Deserialize, Serialize};

use self::admin::AdminConfig;
use self::app::ServerConfig;
use self::lease::LeaseConfig;
use self::logging::LoggingConfig;
use self::rate_limit::RateLimitConfig;
use self::store::StoreConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Lease lifecycle settings (timeouts, sweep cadence, content bounds).
    #[serde(default)]
    pub lease: LeaseConfig,
    /// Per-client admission rate limits.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Lease store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Admin endpoint settings.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `SOLOROOM`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SOLOROOM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the lease protocol cannot operate under.
    ///
    /// The heartbeat timeout must leave margin over the advertised interval,
    /// and every window, cadence, and limit must be non-zero.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.lease.heartbeat_timeout_seconds < self.lease.heartbeat_interval_seconds {
            return Err(AppError::configuration(format!(
                "lease.heartbeat_timeout_seconds ({}) must be >= lease.heartbeat_interval_seconds ({})",
                self.lease.heartbeat_timeout_seconds, self.lease.heartbeat_interval_seconds
            )));
        }
        if self.lease.heartbeat_interval_seconds == 0
            || self.lease.max_occupancy_seconds == 0
            || self.lease.sweep_interval_seconds == 0
        {
            return Err(AppError::configuration(
                "lease intervals and timeouts must be non-zero",
            ));
        }
        if self.lease.max_text_length == 0 {
            return Err(AppError::configuration(
                "lease.max_text_length must be non-zero",
            ));
        }
        if self.rate_limit.window_seconds == 0
            || self.rate_limit.entry_limit == 0
            || self.rate_limit.heartbeat_limit == 0
        {
            return Err(AppError::configuration(
                "rate_limit window and limits must be non-zero",
            ));
        }
        Ok(())
    }
}
