//! Configuration management
//!
//! This module handles loading and parsing configuration for the newsdesk service.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Initial data loaded into the store at startup
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin (the dashboard frontend)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token handed out on login and expected on protected routes
    #[serde(default = "default_token")]
    pub token: String,
    /// Accounts registered at startup
    #[serde(default)]
    pub seed_users: Vec<SeedUser>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
            seed_users: Vec::new(),
        }
    }
}

fn default_token() -> String {
    "demo-token".to_string()
}

/// An account created at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Maximum number of cached entries
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}

fn default_max_capacity() -> u64 {
    10_000
}

/// Seed data configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Category names created at startup
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - NEWSDESK_SERVER_HOST
    /// - NEWSDESK_SERVER_PORT
    /// - NEWSDESK_SERVER_CORS_ORIGIN
    /// - NEWSDESK_AUTH_TOKEN
    /// - NEWSDESK_CACHE_TTL_SECONDS
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("NEWSDESK_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("NEWSDESK_SERVER_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid NEWSDESK_SERVER_PORT: {}", port),
            }
        }
        if let Ok(cors_origin) = std::env::var("NEWSDESK_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        if let Ok(token) = std::env::var("NEWSDESK_AUTH_TOKEN") {
            if !token.trim().is_empty() {
                self.auth.token = token;
            }
        }

        if let Ok(ttl) = std::env::var("NEWSDESK_CACHE_TTL_SECONDS") {
            match ttl.parse::<u64>() {
                Ok(ttl) => self.cache.ttl_seconds = ttl,
                Err(_) => tracing::warn!("Ignoring invalid NEWSDESK_CACHE_TTL_SECONDS: {}", ttl),
            }
        }
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared by every test that touches NEWSDESK_* variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
const ENV_KEYS: [&str; 5] = [
    "NEWSDESK_SERVER_HOST",
    "NEWSDESK_SERVER_PORT",
    "NEWSDESK_SERVER_CORS_ORIGIN",
    "NEWSDESK_AUTH_TOKEN",
    "NEWSDESK_CACHE_TTL_SECONDS",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origin, "http://localhost:3000");
        assert_eq!(config.auth.token, "demo-token");
        assert!(config.auth.seed_users.is_empty());
        assert_eq!(config.cache.ttl_seconds, 300);
        assert!(config.seed.categories.is_empty());
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "   \n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.token, "demo-token");
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 3001\n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.cache.max_capacity, 10_000);
    }

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 9000
  cors_origin: "https://dash.example.com"
auth:
  token: "s3cret"
  seed_users:
    - email: "editor@example.com"
      password: "hunter2"
cache:
  ttl_seconds: 60
  max_capacity: 500
seed:
  categories: ["Politics", "Sports"]
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors_origin, "https://dash.example.com");
        assert_eq!(config.auth.token, "s3cret");
        assert_eq!(
            config.auth.seed_users,
            vec![SeedUser {
                email: "editor@example.com".to_string(),
                password: "hunter2".to_string(),
            }]
        );
        assert_eq!(config.cache.ttl_seconds, 60);
        assert_eq!(config.cache.max_capacity, 500);
        assert_eq!(config.seed.categories, vec!["Politics", "Sports"]);
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_load_invalid_yaml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: not_a_number\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_malformed_yaml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  host: [invalid yaml").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_env_override() {
        let _guard = lock_env();
        clear_env();

        std::env::set_var("NEWSDESK_SERVER_HOST", "10.0.0.1");
        std::env::set_var("NEWSDESK_SERVER_PORT", "9999");
        std::env::set_var("NEWSDESK_AUTH_TOKEN", "env-token");
        std::env::set_var("NEWSDESK_CACHE_TTL_SECONDS", "42");

        let config = Config::load_with_env(std::path::Path::new("nonexistent.yml")).unwrap();
        clear_env();

        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.auth.token, "env-token");
        assert_eq!(config.cache.ttl_seconds, 42);
    }

    #[test]
    fn test_env_override_invalid_values_ignored() {
        let _guard = lock_env();
        clear_env();

        std::env::set_var("NEWSDESK_SERVER_PORT", "not_a_port");
        std::env::set_var("NEWSDESK_AUTH_TOKEN", "   ");
        std::env::set_var("NEWSDESK_CACHE_TTL_SECONDS", "-5");

        let config = Config::load_with_env(std::path::Path::new("nonexistent.yml")).unwrap();
        clear_env();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.token, "demo-token");
        assert_eq!(config.cache.ttl_seconds, 300);
    }

    #[test]
    fn test_env_override_beats_file() {
        let _guard = lock_env();
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 3001\n").unwrap();
        std::env::set_var("NEWSDESK_SERVER_PORT", "4001");

        let config = Config::load_with_env(file.path()).unwrap();
        clear_env();

        assert_eq!(config.server.port, 4001);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn valid_host_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
                .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d)),
            Just("localhost".to_string()),
            "[a-z][a-z0-9]{0,10}",
        ]
    }

    fn valid_config_strategy() -> impl Strategy<Value = Config> {
        (
            valid_host_strategy(),
            1u16..=65535,
            "[a-z][a-zA-Z0-9_]{0,23}",
            1u64..=86400,
            prop::collection::vec("[A-Z][a-z]{2,10}", 0..4),
        )
            .prop_map(|(host, port, token, ttl_seconds, categories)| Config {
                server: ServerConfig {
                    host,
                    port,
                    cors_origin: default_cors_origin(),
                },
                auth: AuthConfig {
                    token,
                    seed_users: Vec::new(),
                },
                cache: CacheConfig {
                    ttl_seconds,
                    max_capacity: default_max_capacity(),
                },
                seed: SeedConfig { categories },
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn config_yaml_roundtrip(config in valid_config_strategy()) {
            let yaml = serde_yaml::to_string(&config).expect("Failed to serialize config");

            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let parsed = Config::load(file.path()).expect("Failed to parse config");

            prop_assert_eq!(config.server.host, parsed.server.host);
            prop_assert_eq!(config.server.port, parsed.server.port);
            prop_assert_eq!(config.auth.token, parsed.auth.token);
            prop_assert_eq!(config.cache.ttl_seconds, parsed.cache.ttl_seconds);
            prop_assert_eq!(config.seed.categories, parsed.seed.categories);
        }

        #[test]
        fn port_only_config_keeps_other_defaults(port in 1u16..=65535) {
            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "server:\n  port: {}\n", port).expect("Failed to write config");

            let config = Config::load(file.path()).expect("Failed to parse config");

            prop_assert_eq!(config.server.port, port);
            prop_assert_eq!(config.server.host, default_host());
            prop_assert_eq!(config.auth.token, default_token());
            prop_assert_eq!(config.cache.ttl_seconds, default_ttl());
        }
    }
}
