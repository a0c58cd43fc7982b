//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{Email, NewUser, UserRecord, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A uniqueness constraint on username or email rejected the insert.
        Duplicate { message: String } => "user already exists: {message}",
    }
}

/// Account store.
///
/// Email and username are each unique. Records are never updated or deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether any account already uses `email` or `username`.
    async fn exists_with_email_or_username(
        &self,
        email: &Email,
        username: &Username,
    ) -> Result<bool, UserRepositoryError>;

    /// Fetch the account registered under `email`.
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, UserRepositoryError>;

    /// Persist a new account and return it with its assigned identifier.
    ///
    /// Fails with [`UserRepositoryError::Duplicate`] when a concurrent
    /// registration claimed the email or username first.
    async fn insert(&self, user: &NewUser) -> Result<UserRecord, UserRepositoryError>;
}
