//! Configuration for the coordinator core's database access.

use crate::error::{CoordinatorError, Result};

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Timezone nominal times are interpreted in. Only UTC is supported by
    /// the scope parser today; kept configurable for parity with the engine's
    /// processing timezone setting.
    pub processing_timezone: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/coordinator_development".to_string(),
            max_connections: 10,
            processing_timezone: "UTC".to_string(),
        }
    }
}

impl CoordinatorConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(max_connections) = std::env::var("COORD_MAX_CONNECTIONS") {
            config.max_connections = max_connections.parse().map_err(|e| {
                CoordinatorError::Configuration {
                    message: format!("invalid max_connections: {e}"),
                }
            })?;
        }

        if let Ok(tz) = std::env::var("COORD_PROCESSING_TIMEZONE") {
            config.processing_timezone = tz;
        }

        Ok(config)
    }
}
