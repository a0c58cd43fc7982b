//! Driving port for account registration and login.
//!
//! Inbound adapters call this port with already-validated payloads and get
//! back a token plus the public account fields.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, RegistrationRequest};

/// Registration and login use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Create an account and sign a token for it.
    ///
    /// Fails with a conflict error when the email or username is taken.
    async fn register(&self, request: RegistrationRequest) -> Result<AuthSession, Error>;

    /// Check credentials and sign a fresh token.
    ///
    /// Unknown emails and wrong passwords fail identically.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;
}
