/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, STORE_BACKEND, DATABASE_URL, CORS 許可など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_SQIDS_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Where post documents live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,
}

impl Default for Config {
    /// Local development defaults: port 3001, in-memory store, the React dev
    /// server as the only CORS origin.
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            app_env: AppEnv::Development,
            store_backend: StoreBackend::Memory,
            database_url: None,
            database_max_connections: 5,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
            request_timeout: Duration::from_secs(30),
            request_body_limit_bytes: 1024 * 1024,
            sqids_min_length: 10,
            sqids_alphabet: DEFAULT_SQIDS_ALPHABET.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => defaults.addr.port(),
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let store_backend = match std::env::var("STORE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StoreBackend::Postgres,
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.database_max_connections);

        let cors_allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => split_origins(&raw),
            Err(_) => defaults.cors_allowed_origins,
        };

        let request_timeout = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.request_body_limit_bytes);

        let sqids_min_length = std::env::var("SQIDS_MIN_LENGTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.sqids_min_length);

        let sqids_alphabet =
            std::env::var("SQIDS_ALPHABET").unwrap_or(defaults.sqids_alphabet);

        Ok(Self {
            addr,
            app_env,
            store_backend,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            request_timeout,
            request_body_limit_bytes,
            sqids_min_length,
            sqids_alphabet,
        })
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
