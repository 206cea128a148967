//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `gather.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use gather_app::scheduler::SchedulerConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Background reminder scheduler settings.
    pub scheduler: SchedulerSettings,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Background scheduler configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Run the background reminder scheduler at all.
    pub enabled: bool,
    /// Seconds between reminder ticks.
    pub interval_secs: u64,
    /// Seconds between due-time checks.
    pub poll_secs: u64,
    /// Maximum simultaneous tick executions.
    pub max_concurrent_ticks: usize,
}

impl Config {
    /// Load configuration from `gather.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("gather.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GATHER_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("GATHER_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("GATHER_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("GATHER_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("GATHER_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.scheduler.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "scheduler interval must be non-zero".to_string(),
            ));
        }
        if self.scheduler.poll_secs == 0 {
            return Err(ConfigError::Validation(
                "scheduler poll must be non-zero".to_string(),
            ));
        }
        if self.scheduler.max_concurrent_ticks == 0 {
            return Err(ConfigError::Validation(
                "scheduler concurrency must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Translate the scheduler section into the application-level config.
    #[must_use]
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            interval: Duration::from_secs(self.scheduler.interval_secs),
            poll: Duration::from_secs(self.scheduler.poll_secs),
            max_concurrent_ticks: self.scheduler.max_concurrent_ticks,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:gather.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "gatherd=info,gather=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60 * 60,
            poll_secs: 60,
            max_concurrent_ticks: 2,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:gather.db?mode=rwc");
        assert!(config.scheduler.enabled);
        assert_eq!(config.scheduler.interval_secs, 3600);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [scheduler]
            enabled = false
            interval_secs = 1800
            poll_secs = 30
            max_concurrent_ticks = 1
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert!(!config.scheduler.enabled);
        assert_eq!(config.scheduler.interval_secs, 1800);
        assert_eq!(config.scheduler.poll_secs, 30);
        assert_eq!(config.scheduler.max_concurrent_ticks, 1);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_scheduler_interval() {
        let mut config = Config::default();
        config.scheduler.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_scheduler_concurrency() {
        let mut config = Config::default();
        config.scheduler.max_concurrent_ticks = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults_as_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_format_custom_bind_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn should_translate_scheduler_section() {
        let mut config = Config::default();
        config.scheduler.interval_secs = 120;
        config.scheduler.poll_secs = 5;
        config.scheduler.max_concurrent_ticks = 1;

        let scheduler = config.scheduler_config();
        assert_eq!(scheduler.interval, Duration::from_secs(120));
        assert_eq!(scheduler.poll, Duration::from_secs(5));
        assert_eq!(scheduler.max_concurrent_ticks, 1);
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [server]
            port = 8080
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "sqlite:gather.db?mode=rwc");
        assert!(config.scheduler.enabled);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
