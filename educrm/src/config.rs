//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `EDUCRM_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `EDUCRM_` override YAML values
//! 3. **DATABASE_URL** - Special case: overrides `database.url` if set
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `EDUCRM_DATABASE__URL=postgres://...` sets the `database.url` field.

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "EDUCRM_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// This is the root configuration structure loaded from YAML and environment variables.
/// All fields have sensible defaults defined in the `Default` implementation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Deprecated: Use `database` field instead. Kept for backward compatibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// PostgreSQL connection configuration
    pub database: DatabaseConfig,
    /// Username for the initial admin user (created on first startup)
    pub admin_username: String,
    /// Password for the initial admin user (optional, can be set via environment)
    pub admin_password: Option<String>,
    /// Secret key for JWT signing (required when login is used)
    pub secret_key: Option<String>,
    /// Authentication and CORS settings
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_url: None,
            database: DatabaseConfig::default(),
            admin_username: "admin".to_string(),
            admin_password: None,
            secret_key: None,
            auth: AuthConfig::default(),
        }
    }
}

/// PostgreSQL connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection string for the database
    pub url: String,
    /// Connection pool settings
    pub pool: PoolSettings,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432/educrm".to_string(),
            pool: PoolSettings::default(),
        }
    }
}

/// Individual pool configuration with all SQLx parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSettings {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of idle connections to maintain
    pub min_connections: u32,
    /// Maximum time to wait for a connection (seconds)
    pub acquire_timeout_secs: u64,
    /// Time before idle connections are closed (seconds, 0 = never)
    pub idle_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600, // 10 minutes
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// JWT token expiry duration
    #[serde(with = "humantime_serde")]
    pub jwt_expiry: Duration,
    /// CORS configuration for browser clients
    pub cors: CorsConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_expiry: Duration::from_secs(24 * 60 * 60), // 24 hours
            cors: CorsConfig::default(),
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<CorsOrigin>,
    /// Allow credentials (cookies) in CORS requests
    pub allow_credentials: bool,
    /// Cache preflight requests for this many seconds
    pub max_age: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            // The admin SPA is served from a separate origin in development
            allowed_origins: vec![CorsOrigin::Wildcard],
            allow_credentials: false,
            max_age: Some(3600), // Cache preflight for 1 hour
        }
    }
}

/// A single allowed CORS origin.
///
/// Can be either a wildcard (`*`) to allow all origins, or a specific URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    /// Allow all origins (`*`)
    #[serde(deserialize_with = "parse_wildcard")]
    Wildcard,
    /// Specific origin URL (e.g., `https://app.example.com`)
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

impl Config {
    fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("EDUCRM_").split("__"))
            // Common DATABASE_URL pattern
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    /// Load configuration from file and environment, then validate it.
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        // if database_url is set, use it (preserving pool settings)
        if let Some(url) = config.database_url.take() {
            config.database.url = url;
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.auth.jwt_expiry.as_secs() < 300 {
            // Less than 5 minutes
            return Err(Error::Internal {
                operation: "Config validation: JWT expiry duration is too short (minimum 5 minutes)".to_string(),
            });
        }

        if self.auth.jwt_expiry.as_secs() > 86400 * 30 {
            // More than 30 days
            return Err(Error::Internal {
                operation: "Config validation: JWT expiry duration is too long (maximum 30 days)".to_string(),
            });
        }

        if self.admin_password.is_some() && self.secret_key.is_none() {
            return Err(Error::Internal {
                operation: "Config validation: admin_password is set but secret_key is not configured. \
                 Please set EDUCRM_SECRET_KEY or add secret_key to the config file."
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Socket address string to bind the HTTP server to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn defaults_when_no_file_present() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load(&args_for("missing.yaml")).expect("defaults should load");
            assert_eq!(config.port, 8000);
            assert_eq!(config.admin_username, "admin");
            assert_eq!(config.database.pool.max_connections, 10);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
                port: 9000
                admin_username: boss
                "#,
            )?;
            jail.set_env("EDUCRM_PORT", "9100");
            let config = Config::load(&args_for("config.yaml")).expect("config should load");
            assert_eq!(config.port, 9100);
            assert_eq!(config.admin_username, "boss");
            Ok(())
        });
    }

    #[test]
    fn database_url_env_takes_priority() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
                database:
                  url: postgres://yaml-host/educrm
                "#,
            )?;
            jail.set_env("DATABASE_URL", "postgres://env-host/educrm");
            let config = Config::load(&args_for("config.yaml")).expect("config should load");
            assert_eq!(config.database.url, "postgres://env-host/educrm");
            Ok(())
        });
    }

    #[test]
    fn cors_origins_parse() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
                auth:
                  cors:
                    allowed_origins: ["*", "https://admin.example.com"]
                "#,
            )?;
            let config = Config::load(&args_for("config.yaml")).expect("config should load");
            assert!(matches!(config.auth.cors.allowed_origins[0], CorsOrigin::Wildcard));
            assert!(matches!(
                &config.auth.cors.allowed_origins[1],
                CorsOrigin::Url(url) if url.as_str() == "https://admin.example.com/"
            ));
            Ok(())
        });
    }

    #[test]
    fn rejects_admin_password_without_secret_key() {
        let config = Config {
            admin_password: Some("hunter2".to_string()),
            secret_key: None,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
