//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants in each
//! type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failures.
//! - UserProfile, Username, Email: account model.
//! - RegistrationRequest, LoginCredentials, TokenClaims: authentication.
//! - Post, PostContent, PostPage: board content.
//! - AuthService, PostsService: implementations of the driving ports.

pub mod auth;
mod auth_service;
pub mod error;
pub mod ports;
pub mod post;
mod posts_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthSession, AuthToken, AuthValidationError, LoginCredentials, PASSWORD_MIN_CHARS, Password,
    PasswordHash, RegistrationRequest, TokenClaims, TokenSubject,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::post::{
    CREATED_AT_FORMAT, OwnedMutation, Post, PostContent, PostId, PostPage, PostValidationError,
};
pub use self::posts_service::PostsService;
pub use self::trace_id::TraceId;
pub use self::user::{Email, NewUser, UserId, UserProfile, UserRecord, UserValidationError, Username};
