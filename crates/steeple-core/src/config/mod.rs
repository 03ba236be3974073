use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub calendar: CalendarConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    SingleUser,
    BasicAuth,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub single_user: Option<SingleUserAuthConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserAuthConfig {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: Option<String>,
    pub max_connections: u8,
}

impl DatabaseConfig {
    /// ## Summary
    /// Returns the Postgres connection URL.
    ///
    /// ## Errors
    /// Returns `ConfigError` when the Postgres backend is selected without a URL.
    pub fn postgres_url(&self) -> CoreResult<&str> {
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                CoreError::ConfigError("database.url is required for the postgres backend".into())
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn serve_origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the server origin URL.
    #[must_use]
    pub fn origin(&self) -> String {
        if let Some(origin) = &self.serve_origin {
            origin.clone()
        } else {
            self.serve_origin()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded objects are written under.
    pub root: String,
    /// Prefix prepended to object keys to form public URLs.
    pub public_base_url: String,
    pub max_upload_bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// IANA zone name used to decide what "today" is.
    pub timezone: String,
    pub weeks_ahead: u32,
}

impl CalendarConfig {
    /// ## Summary
    /// Parses the configured IANA time zone.
    ///
    /// ## Errors
    /// Returns `ConfigError` if the zone name is unknown.
    pub fn tz(&self) -> CoreResult<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|e| CoreError::ConfigError(format!("unknown calendar.timezone: {e}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from defaults only. Used by tests and the in-memory dev mode.
    ///
    /// ## Errors
    /// Returns an error if the defaults fail to deserialize.
    pub fn defaults() -> Result<Self> {
        Ok(Self::builder()?.build()?.try_deserialize::<Settings>()?)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("database.backend", "memory")?
            .set_default("database.max_connections", 4)?
            .set_default("auth.method", "single_user")?
            .set_default("auth.single_user.name", "Administrator")?
            .set_default("auth.single_user.email", "admin@localhost")?
            .set_default("storage.root", "./uploads")?
            .set_default("storage.public_base_url", "/uploads")?
            .set_default("storage.max_upload_bytes", 10 * 1024 * 1024)?
            .set_default("calendar.timezone", "America/New_York")?
            .set_default("calendar.weeks_ahead", 4)?
            .set_default("logging.level", "debug")?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
