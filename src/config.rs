//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file, applies environment
//! overrides (the database URL normally arrives through `MONGO_URL`), and
//! validates the result. `AppConfig` is the root configuration struct.

use const_format::formatcp;
use serde::Deserialize;
use std::io;
use std::path::Path;
use std::time::Duration;

// =============================================================================
// Service Identity
// =============================================================================

/// Service name reported by the health endpoint and the OpenAPI document
pub const SERVICE_NAME: &str = "HAÜSA ERP API";

/// Long description used in the OpenAPI document
pub const SERVICE_DESCRIPTION: &str =
    "Enterprise Resource Planning system for HAÜSA construction";

/// Service version, taken from the crate version
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Documentation pages change only with a new release
pub const HTTP_CACHE_DOCS_MAX_AGE: u32 = 3600;

/// Probes must never be served from a cache
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

pub const CACHE_CONTROL_DOCS: &str = formatcp!("public, max-age={}", HTTP_CACHE_DOCS_MAX_AGE);

// =============================================================================
// Database Defaults
// =============================================================================

/// Environment variable holding the database connection target
pub const DATABASE_URL_ENV: &str = "MONGO_URL";

/// Logical database (namespace) selected for all queries
pub const DEFAULT_DATABASE_NAME: &str = "hausa_erp";

/// Upper bound on connection establishment at startup
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Accepted connection string schemes
pub const DATABASE_URL_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

// =============================================================================
// HTTP Server Defaults
// =============================================================================

pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 8001;

/// Time allowed for in-flight requests to finish after a stop signal
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "hausa_api=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Wildcard entry in `cors.allow_origins`
pub const CORS_ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Cross-origin resource sharing
    #[serde(default)]
    pub cors: CorsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Grace period for draining connections on shutdown
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }
}

/// What to do when the database cannot be reached at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectFailurePolicy {
    /// Abort startup; the listener is never bound
    #[default]
    Exit,
    /// Log and keep serving without a database
    Continue,
}

/// Database connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection target. Usually unset in the file and supplied by `MONGO_URL`.
    pub url: Option<String>,
    /// Namespace selected by `Lifecycle::get_database`
    #[serde(default = "DatabaseConfig::default_name")]
    pub name: String,
    #[serde(default = "DatabaseConfig::default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default)]
    pub on_connect_failure: ConnectFailurePolicy,
    /// Application name reported to the server in the handshake
    pub app_name: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: Self::default_name(),
            connect_timeout_seconds: Self::default_connect_timeout(),
            on_connect_failure: ConnectFailurePolicy::default(),
            app_name: None,
        }
    }
}

impl DatabaseConfig {
    fn default_name() -> String {
        DEFAULT_DATABASE_NAME.to_string()
    }

    fn default_connect_timeout() -> u64 {
        DEFAULT_CONNECT_TIMEOUT_SECS
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Returns the connection target, rejecting a missing or malformed value.
    pub fn target(&self) -> Result<&str, ConfigError> {
        let url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "database URL is not set (set {} or database.url)",
                    DATABASE_URL_ENV
                ))
            })?;

        if !DATABASE_URL_SCHEMES
            .iter()
            .any(|scheme| url.starts_with(scheme))
        {
            return Err(ConfigError::Validation(format!(
                "database URL must start with one of {:?}",
                DATABASE_URL_SCHEMES
            )));
        }

        Ok(url)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `"*"` allows any
    #[serde(default = "CorsConfig::default_origins")]
    pub allow_origins: Vec<String>,
    #[serde(default = "CorsConfig::default_credentials")]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Self::default_origins(),
            allow_credentials: Self::default_credentials(),
        }
    }
}

impl CorsConfig {
    fn default_origins() -> Vec<String> {
        vec![CORS_ANY_ORIGIN.to_string()]
    }

    fn default_credentials() -> bool {
        true
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allow_origins.iter().any(|o| o == CORS_ANY_ORIGIN)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    /// Load configuration from `path`, then apply environment overrides and validate.
    ///
    /// A missing file is only tolerated at the default path, where built-in
    /// defaults are used instead.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound && path == Path::new(DEFAULT_CONFIG_PATH) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.database.url = Some(url);
        }
    }

    /// Check settings that would otherwise only fail once the server is starting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.target()?;

        if self.database.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database.name must not be empty".to_string(),
            ));
        }
        if self.database.connect_timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "database.connect_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.cors.allows_any_origin() && self.cors.allow_origins.len() > 1 {
            return Err(ConfigError::Validation(
                "cors.allow_origins cannot mix \"*\" with explicit origins".to_string(),
            ));
        }
        for origin in self.cors.allow_origins.iter().filter(|o| *o != CORS_ANY_ORIGIN) {
            http::HeaderValue::from_str(origin).map_err(|_| {
                ConfigError::Validation(format!("invalid CORS origin: {:?}", origin))
            })?;
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
