use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub env: Environment,
    pub host: IpAddr,
    pub port: u16,
    pub database_path: String,
    pub cache_ttl: Duration,
    pub cache_max_entries: u64,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub worker_interval: Duration,
}

/// Deployment tier; selects log verbosity and format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let env = match env_map
            .get("APP_ENV")
            .map(|s| s.as_str())
            .unwrap_or("local")
        {
            "local" => Environment::Local,
            "dev" => Environment::Dev,
            "prod" => Environment::Prod,
            other => {
                return Err(ConfigError::InvalidValue(
                    "APP_ENV".to_string(),
                    format!("must be local, dev, or prod, got {}", other),
                ))
            }
        };

        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = parse_or(&env_map, "PORT", 8080u16, "must be a valid u16")?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let cache_ttl_secs = parse_or(&env_map, "CACHE_TTL_SECS", 300u64, "must be a valid u64")?;
        let cache_max_entries =
            parse_or(&env_map, "CACHE_MAX_ENTRIES", 1024u64, "must be a valid u64")?;

        let jwt_secret = env_map
            .get("JWT_SECRET")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("JWT_SECRET".to_string()))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let token_ttl_secs = parse_or(&env_map, "TOKEN_TTL_SECS", 86_400u64, "must be a valid u64")?;

        let worker_interval_secs =
            parse_or(&env_map, "WORKER_INTERVAL_SECS", 5u64, "must be a valid u64")?;
        if worker_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "WORKER_INTERVAL_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Config {
            env,
            host,
            port,
            database_path,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            cache_max_entries,
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            worker_interval: Duration::from_secs(worker_interval_secs),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: T,
    reason: &str,
) -> Result<T, ConfigError> {
    match env_map.get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(key.to_string(), reason.to_string())),
        None => Ok(default),
    }
}
