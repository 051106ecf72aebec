use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

const DEFAULT_PORT: &str = "8787";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::InvalidValue(
                "VIEW_STORE".to_string(),
                other.to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub port: u16,
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    /// Empty means any origin may call the counter.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = Self::get_env_or("PORT", DEFAULT_PORT);
        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("PORT".to_string(), port))?;

        let store = match env::var("VIEW_STORE") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::Postgres,
        };

        let config = Self {
            port,
            store,
            database_url: env::var("DATABASE_URL").ok(),
            redis_url: env::var("REDIS_URL").ok(),
            cors_allowed_origins: Self::parse_origins(&Self::get_env_or(
                "CORS_ALLOWED_ORIGINS",
                "",
            )),
        };
        config.validate()?;

        Ok(config)
    }

    /// The backend's connection string must be present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.store {
            StoreBackend::Postgres if self.database_url.is_none() => {
                Err(ConfigError::MissingVar("DATABASE_URL".to_string()))
            }
            StoreBackend::Redis if self.redis_url.is_none() => {
                Err(ConfigError::MissingVar("REDIS_URL".to_string()))
            }
            _ => Ok(()),
        }
    }

    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| origin.trim_end_matches('/').to_string())
            .collect()
    }

    fn get_env_or(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_case_insensitively() {
        assert_eq!("Redis".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
        assert_eq!(
            "postgresql".parse::<StoreBackend>().unwrap(),
            StoreBackend::Postgres
        );
        assert_eq!(" memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!(matches!(
            "sqlite".parse::<StoreBackend>(),
            Err(ConfigError::InvalidValue(_, _))
        ));
    }

    #[test]
    fn origins_are_trimmed_and_empty_entries_dropped() {
        let origins = Config::parse_origins(" https://example.com/, ,http://localhost:3000");
        assert_eq!(
            origins,
            vec![
                "https://example.com".to_string(),
                "http://localhost:3000".to_string()
            ]
        );
        assert!(Config::parse_origins("").is_empty());
    }

    #[test]
    fn validate_requires_backend_url() {
        let mut config = Config {
            port: 8787,
            store: StoreBackend::Postgres,
            database_url: None,
            redis_url: None,
            cors_allowed_origins: Vec::new(),
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingVar(_))));

        config.store = StoreBackend::Memory;
        assert!(config.validate().is_ok());

        config.store = StoreBackend::Redis;
        config.redis_url = Some("redis://127.0.0.1/".to_string());
        assert!(config.validate().is_ok());
    }
}
