//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_JUDGE_API_TIMEOUT_SECS, DEFAULT_NOTIFICATION_TTL_SECS, DEFAULT_PROBLEMS_PAGE_SIZE,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SESSION_IDLE_SECS,
    DEFAULT_SESSION_SWEEP_INTERVAL_SECS, DEFAULT_SUBMISSIONS_PAGE_SIZE,
    DEFAULT_VIEWER_CHANNEL_CAPACITY,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub judge_api: JudgeApiConfig,
    pub console: ConsoleConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Judge API connection configuration
#[derive(Debug, Clone)]
pub struct JudgeApiConfig {
    /// Base URL every judge endpoint is resolved against
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Console behaviour configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Lifetime of save/load notifications
    pub notification_ttl_secs: u64,
    pub submissions_page_size: u32,
    pub problems_page_size: u32,
    /// Buffered messages per submission viewer
    pub viewer_channel_capacity: usize,
    /// Editors and viewers unused for this long are closed
    pub session_idle_secs: u64,
    pub session_sweep_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            judge_api: JudgeApiConfig::from_env()?,
            console: ConsoleConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl JudgeApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("JUDGE_API_URL")
            .map_err(|_| ConfigError::Missing("JUDGE_API_URL".to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: parse_var("JUDGE_API_TIMEOUT_SECS", DEFAULT_JUDGE_API_TIMEOUT_SECS)?,
        })
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ConsoleConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            notification_ttl_secs: parse_var(
                "NOTIFICATION_TTL_SECS",
                DEFAULT_NOTIFICATION_TTL_SECS,
            )?,
            submissions_page_size: parse_var(
                "SUBMISSIONS_PAGE_SIZE",
                DEFAULT_SUBMISSIONS_PAGE_SIZE,
            )?,
            problems_page_size: parse_var("PROBLEMS_PAGE_SIZE", DEFAULT_PROBLEMS_PAGE_SIZE)?,
            viewer_channel_capacity: parse_var(
                "VIEWER_CHANNEL_CAPACITY",
                DEFAULT_VIEWER_CHANNEL_CAPACITY,
            )?,
            session_idle_secs: parse_var("SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)?,
            session_sweep_interval_secs: parse_var(
                "SESSION_SWEEP_INTERVAL_SECS",
                DEFAULT_SESSION_SWEEP_INTERVAL_SECS,
            )?,
        })
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs.max(1))
    }

    /// Notification lifetime as a chrono duration
    pub fn notification_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notification_ttl_secs as i64)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            notification_ttl_secs: DEFAULT_NOTIFICATION_TTL_SECS,
            submissions_page_size: DEFAULT_SUBMISSIONS_PAGE_SIZE,
            problems_page_size: DEFAULT_PROBLEMS_PAGE_SIZE,
            viewer_channel_capacity: DEFAULT_VIEWER_CHANNEL_CAPACITY,
            session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
            session_sweep_interval_secs: DEFAULT_SESSION_SWEEP_INTERVAL_SECS,
        }
    }
}

/// Configuration for unit tests, pointing at an unreachable judge
#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "debug".to_string(),
        },
        judge_api: JudgeApiConfig {
            base_url: "http://judge.invalid".to_string(),
            timeout_secs: 1,
        },
        console: ConsoleConfig::default(),
    }
}

/// Read an optional variable, falling back to `default` when it is unset
fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);

        let console = ConsoleConfig::default();
        assert_eq!(console.notification_ttl_secs, 3);
        assert_eq!(console.submissions_page_size, 50);
        assert_eq!(console.notification_ttl(), chrono::Duration::seconds(3));
        assert_eq!(console.session_idle(), Duration::from_secs(1800));
    }

    #[test]
    fn test_parse_var_falls_back_when_unset() {
        let value: u32 = parse_var("JUDGE_CONSOLE_SURELY_UNSET_VARIABLE", 17).unwrap();
        assert_eq!(value, 17);
    }
}
