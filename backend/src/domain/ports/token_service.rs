//! Port for issuing and verifying bearer tokens.

use crate::domain::{AuthToken, TokenClaims, TokenSubject};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token was well formed and correctly signed but is past expiry.
        Expired => "token has expired",
        /// Signature mismatch, malformed structure or missing claims.
        Invalid { message: String } => "invalid token: {message}",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Stateless signed tokens. Nothing is persisted, so there is no revocation.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token for `subject` valid from now until now plus the
    /// configured lifetime.
    fn issue(&self, subject: &TokenSubject) -> Result<AuthToken, TokenError>;

    /// Check signature and expiry and return the decoded claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
