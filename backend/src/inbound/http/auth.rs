//! Access guard for bearer-authenticated endpoints.
//!
//! Handlers that take an [`AuthenticatedUser`] only run once the request's
//! `Authorization: Bearer <token>` header has been verified. The decoded
//! claims are also stored in the request extensions.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::ports::TokenError;
use crate::domain::{Error, TokenClaims, Username};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, taken from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(TokenClaims);

impl AuthenticatedUser {
    /// Verified claims.
    pub fn claims(&self) -> &TokenClaims {
        &self.0
    }

    /// Username the token was issued for.
    pub fn username(&self) -> &Username {
        &self.0.username
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let Some(token) = bearer_token(req) else {
        warn!(path = %req.path(), "request rejected: bearer token missing");
        return Err(Error::unauthorized("authentication token is missing"));
    };

    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not configured"))?;

    let claims = state.tokens.verify(token).map_err(|err| {
        warn!(path = %req.path(), error = %err, "request rejected: bearer token refused");
        match err {
            TokenError::Expired => Error::unauthorized("token has expired"),
            _ => Error::unauthorized("invalid token"),
        }
    })?;

    req.extensions_mut().insert(claims.clone());
    Ok(AuthenticatedUser(claims))
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
