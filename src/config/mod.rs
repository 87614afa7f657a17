use serde::Serialize;
use std::env;
use thiserror::Error;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://portfolio.db";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process-wide settings, built once at startup and shared through `AppState`.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    #[serde(skip_serializing)]
    pub secret_key: String,
    pub allowed_origin: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
        }
    }
}

impl AppConfig {
    /// Config with defaults everywhere except the write secret.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
        }
    }

    pub fn with_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = origin.into();
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("SECRET_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("SECRET_KEY"))?;

        let mut config = Self::new(secret_key);

        if let Some(v) = lookup("ALLOWED_ORIGIN").filter(|v| !v.trim().is_empty()) {
            config.allowed_origin = v.trim().to_string();
        }

        // Server overrides
        if let Some(v) = lookup("HOST").filter(|v| !v.is_empty()) {
            config.server.host = v;
        }
        if let Some(v) = lookup("PORTFOLIO_API_PORT").or_else(|| lookup("PORT")) {
            config.server.port = v.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: v.clone(),
            })?;
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            config.database.url = v;
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections = match v.parse() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value: v,
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
