//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! 1. Bundled defaults (`trailcall.toml` at the workspace root, compiled in)
//! 2. `~/.config/trailcall/trailcall.toml`
//! 3. `./trailcall.toml`
//! 4. Environment variables `TRAILCALL__<SECTION>__<KEY>`
//!
//! A `.env` file in the working directory is loaded into the environment
//! first.

use chrono::Duration;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use trailcall_attendance::MatchPolicy;
use trailcall_error::{ConfigError, TrailcallError, TrailcallResult};
use trailcall_security::{AdminGate, InMemorySessionStore, PinVerifier};

const DEFAULT_CONFIG: &str = include_str!("../../../trailcall.toml");

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct DatabaseConfig {
    /// Connection URL; `DATABASE_URL` is used when absent
    #[serde(default)]
    url: Option<String>,
    /// Maximum pooled connections
    pool_size: u32,
}

impl DatabaseConfig {
    /// The configured URL, else `DATABASE_URL`.
    pub fn resolved_url(&self) -> Option<String> {
        self.url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }
}

/// Public RSVP settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RsvpConfig {
    /// Minimum similarity for linking an RSVP to a member
    member_match_threshold: u8,
}

/// Admin session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionConfig {
    /// Token lifetime in hours
    ttl_hours: u32,
    /// Hex SHA-256 of the admin PIN
    #[serde(default)]
    pin_hash: Option<String>,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    level: String,
    /// Emit JSON lines
    json: bool,
}

/// Complete TrailCall configuration.
///
/// # Examples
///
/// ```
/// use trailcall::TrailcallConfig;
///
/// let config = TrailcallConfig::defaults().unwrap();
/// assert_eq!(*config.rsvp().member_match_threshold(), 80);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TrailcallConfig {
    /// `[database]`
    database: DatabaseConfig,
    /// `[rsvp]`
    rsvp: RsvpConfig,
    /// `[session]`
    session: SessionConfig,
    /// `[logging]`
    logging: LoggingConfig,
}

impl TrailcallConfig {
    /// The bundled defaults alone.
    pub fn defaults() -> TrailcallResult<Self> {
        Self::build(bundled())
    }

    /// Load every source in precedence order.
    ///
    /// # Errors
    ///
    /// Returns a ConfigError when a present file fails to parse or a value
    /// has the wrong type.
    pub fn load() -> TrailcallResult<Self> {
        dotenvy::dotenv().ok();
        debug!("Loading configuration: env > ./trailcall.toml > user config > bundled defaults");

        let mut builder = bundled();
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config/trailcall/trailcall.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }
        builder = builder
            .add_source(File::with_name("trailcall").required(false))
            .add_source(
                Environment::with_prefix("TRAILCALL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = Self::build(builder)?;
        config.validate()?;
        Ok(config)
    }

    /// Bundled defaults overlaid with one file.
    pub fn from_file(path: impl AsRef<Path>) -> TrailcallResult<Self> {
        let builder = bundled().add_source(File::from(path.as_ref()));
        let config = Self::build(builder)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the services cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rsvp.member_match_threshold > 100 {
            return Err(ConfigError::new(format!(
                "rsvp.member_match_threshold must be at most 100, got {}",
                self.rsvp.member_match_threshold
            )));
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::new("database.pool_size must be at least 1"));
        }
        if self.session.ttl_hours == 0 {
            return Err(ConfigError::new("session.ttl_hours must be at least 1"));
        }
        Ok(())
    }

    /// RSVP matching policy from `[rsvp]`.
    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy::new(self.rsvp.member_match_threshold)
    }

    /// Session lifetime from `[session]`.
    pub fn session_ttl(&self) -> Duration {
        Duration::hours(i64::from(self.session.ttl_hours))
    }

    /// Admin gate for `session.pin_hash`, issuing tokens that live for
    /// [`session_ttl`](Self::session_ttl).
    pub fn admin_gate(&self) -> AdminGate {
        AdminGate::new(
            PinVerifier::new(self.session.pin_hash.clone()),
            Arc::new(InMemorySessionStore::new(self.session_ttl())),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> TrailcallResult<Self> {
        builder
            .build()
            .map_err(|e| {
                TrailcallError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                TrailcallError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

fn bundled() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}
