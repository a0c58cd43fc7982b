//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing a password.
    pub enum PasswordHashError {
        /// Nothing to hash.
        EmptyInput => "password must not be empty",
        /// The hashing primitive failed.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted, deliberately slow password hashing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Whether `password` matches `hash`. Malformed hashes never match.
    async fn verify(&self, password: &Password, hash: &PasswordHash) -> bool;
}
