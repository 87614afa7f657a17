use std::sync::Arc;

use axum::http::HeaderValue;

use crate::config::{AppConfig, ConfigError};
use crate::database::Database;

/// Shared application state available to handlers and middleware via `State<AppState>`.
///
/// Cheap to clone: the config sits behind an `Arc` and the database handle shares its pool.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    /// `Access-Control-Allow-Origin` value, validated once at startup.
    pub cors_origin: HeaderValue,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Result<Self, ConfigError> {
        let cors_origin =
            HeaderValue::from_str(&config.allowed_origin).map_err(|_| ConfigError::Invalid {
                name: "ALLOWED_ORIGIN",
                value: config.allowed_origin.clone(),
            })?;

        Ok(Self {
            config: Arc::new(config),
            db,
            cors_origin,
        })
    }
}
