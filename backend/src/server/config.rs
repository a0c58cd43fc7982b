//! HTTP server configuration object and helpers.

use std::fmt;
use std::net::SocketAddr;

use chrono::TimeDelta;
use zeroize::Zeroizing;

use crate::outbound::persistence::DbPool;
use crate::outbound::security::DEFAULT_BCRYPT_COST;

/// Builder-style configuration for creating the HTTP server.
///
/// Without a database pool the server runs on the in-memory adapters.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: TimeDelta,
    pub(crate) bcrypt_cost: u32,
    pub(crate) db_pool: Option<DbPool>,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("db_pool", &self.db_pool.is_some())
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    /// Configuration signing tokens with `jwt_secret` valid for `token_ttl`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: impl AsRef<[u8]>, token_ttl: TimeDelta) -> Self {
        Self {
            bind_addr,
            jwt_secret: Zeroizing::new(jwt_secret.as_ref().to_vec()),
            token_ttl,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the Diesel adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the bcrypt work factor.
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether the Diesel adapters are in use.
    #[must_use]
    pub fn uses_database(&self) -> bool {
        self.db_pool.is_some()
    }
}
