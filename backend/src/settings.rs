//! Server settings loaded via OrthoConfig.
//!
//! Every value can come from the command line, `BOARD_*` environment
//! variables or a configuration file. Anything left unset falls back to the
//! development defaults below.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::security::{DEFAULT_TOKEN_TTL, TokenTtlError, parse_token_ttl};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "jjh";
const DEFAULT_DB_PASSWORD: &str = "1234";
const DEFAULT_DB_NAME: &str = "board_db";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Signing secret used when none is configured. Startup warns about it.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key";

/// Where accounts and posts are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL through the Diesel adapters.
    Postgres,
    /// Process-local tables, lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = SettingsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(SettingsError::UnknownStorage {
                value: raw.to_owned(),
            }),
        }
    }
}

/// Settings that cannot be turned into a running server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown storage backend {value:?}: expected postgres or memory")]
    UnknownStorage { value: String },
    #[error("bind host {value:?} is not an IP address")]
    InvalidHost { value: String },
    #[error(transparent)]
    InvalidTokenTtl(#[from] TokenTtlError),
}

/// Configuration values for the board server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOARD")]
pub struct BoardSettings {
    /// `postgres` or `memory`.
    pub storage: Option<String>,
    /// Full connection URL; overrides the individual `db_*` values.
    pub database_url: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    /// Maximum pooled connections.
    pub db_pool_size: Option<u32>,
    /// HS256 signing secret.
    pub jwt_secret: Option<String>,
    /// Token lifetime such as `7d` or `12h`.
    pub jwt_expires_in: Option<String>,
    /// Address to bind.
    pub host: Option<String>,
    /// Port to listen on.
    #[ortho_config(default = 3000)]
    pub port: u16,
}

impl BoardSettings {
    /// Selected storage backend, PostgreSQL unless configured otherwise.
    pub fn storage(&self) -> Result<StorageBackend, SettingsError> {
        self.storage
            .as_deref()
            .map_or(Ok(StorageBackend::Postgres), StorageBackend::from_str)
    }

    /// Connection URL, built from the individual parts when no override is
    /// set.
    pub fn database_url(&self) -> String {
        if let Some(url) = self.database_url.as_deref().filter(|url| !url.trim().is_empty()) {
            return url.to_owned();
        }
        format!(
            "postgres://{user}:{password}@{host}:{port}/{name}",
            user = self.db_user.as_deref().unwrap_or(DEFAULT_DB_USER),
            password = self.db_password.as_deref().unwrap_or(DEFAULT_DB_PASSWORD),
            host = self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST),
            port = self.db_port.unwrap_or(DEFAULT_DB_PORT),
            name = self.db_name.as_deref().unwrap_or(DEFAULT_DB_NAME),
        )
    }

    pub fn pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    pub fn jwt_secret(&self) -> &str {
        self.jwt_secret.as_deref().unwrap_or(DEFAULT_JWT_SECRET)
    }

    /// Whether tokens would be signed with the well-known fallback secret.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret() == DEFAULT_JWT_SECRET
    }

    pub fn token_ttl(&self) -> Result<TimeDelta, SettingsError> {
        let raw = self.jwt_expires_in.as_deref().unwrap_or(DEFAULT_TOKEN_TTL);
        Ok(parse_token_ttl(raw)?)
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip = host.parse::<IpAddr>().map_err(|_| SettingsError::InvalidHost {
            value: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
