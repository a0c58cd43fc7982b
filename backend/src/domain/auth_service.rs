//! Registration and login use-cases.
//!
//! Implements [`AuthCommand`] over the account store, the password hasher and
//! the token service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    AuthCommand, PasswordHashError, PasswordHasher, TokenError, TokenService, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    AuthSession, Error, LoginCredentials, NewUser, RegistrationRequest, TokenSubject, UserProfile,
};

const DUPLICATE_ACCOUNT: &str = "email or username already exists";
const BAD_CREDENTIALS: &str = "email or password is incorrect";
const REGISTRATION_FAILED: &str = "registration failed";
const LOGIN_FAILED: &str = "login failed";

/// Account service implementing [`AuthCommand`].
#[derive(Clone)]
pub struct AuthService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AuthService<U, H, T> {
    /// Create a new service over the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn internal(summary: &'static str, cause: impl std::fmt::Display) -> Error {
    let cause = cause.to_string();
    error!(summary, %cause, "authentication use-case failed");
    Error::internal(summary).with_cause(cause)
}

fn map_user_error(summary: &'static str, err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::Duplicate { .. } => Error::conflict(DUPLICATE_ACCOUNT),
        other => internal(summary, other),
    }
}

fn map_hash_error(summary: &'static str, err: PasswordHashError) -> Error {
    internal(summary, err)
}

fn map_token_error(summary: &'static str, err: TokenError) -> Error {
    internal(summary, err)
}

impl<U, H, T> AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    fn open_session(&self, user: UserProfile, summary: &'static str) -> Result<AuthSession, Error> {
        let token = self
            .tokens
            .issue(&TokenSubject::from(&user))
            .map_err(|err| map_token_error(summary, err))?;
        Ok(AuthSession { token, user })
    }
}

#[async_trait]
impl<U, H, T> AuthCommand for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn register(&self, request: RegistrationRequest) -> Result<AuthSession, Error> {
        let taken = self
            .users
            .exists_with_email_or_username(request.email(), request.username())
            .await
            .map_err(|err| map_user_error(REGISTRATION_FAILED, err))?;
        if taken {
            return Err(Error::conflict(DUPLICATE_ACCOUNT));
        }

        let password_hash = self
            .hasher
            .hash(request.password())
            .await
            .map_err(|err| map_hash_error(REGISTRATION_FAILED, err))?;

        let record = self
            .users
            .insert(&NewUser {
                username: request.username().clone(),
                email: request.email().clone(),
                password_hash,
            })
            .await
            .map_err(|err| map_user_error(REGISTRATION_FAILED, err))?;

        let session = self.open_session(record.profile, REGISTRATION_FAILED)?;
        info!(
            user_id = %session.user.id,
            username = %session.user.username,
            "account registered"
        );
        Ok(session)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let record = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| map_user_error(LOGIN_FAILED, err))?
            .ok_or_else(|| Error::unauthorized(BAD_CREDENTIALS))?;

        if !self
            .hasher
            .verify(credentials.password(), &record.password_hash)
            .await
        {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        }

        let session = self.open_session(record.profile, LOGIN_FAILED)?;
        info!(user_id = %session.user.id, "login succeeded");
        Ok(session)
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
