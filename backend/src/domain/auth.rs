//! Authentication primitives: credentials, password material and tokens.
//!
//! Handlers build these from raw request strings; the constructors reject
//! blank input before any port is consulted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::json;
use zeroize::Zeroizing;

use super::Error;
use super::user::{Email, UserId, UserProfile, Username};

/// Shortest accepted password, counted in characters.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Domain error returned when registration or login payloads are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// A registration field was missing or blank.
    MissingRegistrationField {
        /// Name of the first offending field.
        field: &'static str,
    },
    /// Registration password shorter than [`PASSWORD_MIN_CHARS`].
    PasswordTooShort {
        /// Required minimum.
        min: usize,
    },
    /// A login field was missing or blank.
    MissingLoginField {
        /// Name of the first offending field.
        field: &'static str,
    },
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRegistrationField { .. } => write!(f, "all fields are required"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::MissingLoginField { .. } => write!(f, "email and password are required"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<AuthValidationError> for Error {
    fn from(value: AuthValidationError) -> Self {
        let details = match &value {
            AuthValidationError::MissingRegistrationField { field }
            | AuthValidationError::MissingLoginField { field } => {
                json!({ "field": field, "code": "missing_field" })
            }
            AuthValidationError::PasswordTooShort { min } => {
                json!({ "field": "password", "code": "password_too_short", "min": min })
            }
        };
        Error::invalid_request(value.to_string()).with_details(details)
    }
}

/// Plaintext password held in memory that is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap caller-provided plaintext without altering it.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Borrow the plaintext.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Number of characters in the password.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Stored bcrypt hash string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a hash string read from storage or produced by a hasher.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn present<'a>(raw: Option<&'a str>) -> Option<&'a str> {
    raw.filter(|value| !value.trim().is_empty())
}

/// Validated registration payload.
///
/// ## Invariants
/// - `username` and `email` are trimmed and non-empty.
/// - `password` is non-blank and at least [`PASSWORD_MIN_CHARS`] long. It
///   keeps caller whitespace so the stored hash matches what was typed.
///
/// # Examples
/// ```
/// use board_backend::domain::RegistrationRequest;
///
/// let request = RegistrationRequest::try_from_parts(Some("alice"), Some("a@b.c"), Some("secret"))
///     .expect("valid registration");
/// assert_eq!(request.username().as_str(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    username: Username,
    email: Email,
    password: Password,
}

impl RegistrationRequest {
    /// Validate raw registration fields. Presence is checked for every field
    /// before the password length.
    pub fn try_from_parts(
        username: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, AuthValidationError> {
        let missing = |field| AuthValidationError::MissingRegistrationField { field };
        let username = present(username).ok_or_else(|| missing("username"))?;
        let email = present(email).ok_or_else(|| missing("email"))?;
        let password = present(password).ok_or_else(|| missing("password"))?;

        let password = Password::new(password);
        if password.char_count() < PASSWORD_MIN_CHARS {
            return Err(AuthValidationError::PasswordTooShort {
                min: PASSWORD_MIN_CHARS,
            });
        }

        Ok(Self {
            username: Username::new(username).map_err(|_| missing("username"))?,
            email: Email::new(email).map_err(|_| missing("email"))?,
            password,
        })
    }

    /// Requested handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested login address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Chosen password.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Password,
}

impl LoginCredentials {
    /// Validate raw login fields.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, AuthValidationError> {
        let missing = |field| AuthValidationError::MissingLoginField { field };
        let email = present(email).ok_or_else(|| missing("email"))?;
        let password = present(password).ok_or_else(|| missing("password"))?;
        Ok(Self {
            email: Email::new(email).map_err(|_| missing("email"))?,
            password: Password::new(password),
        })
    }

    /// Login address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Supplied password.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Subject a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    /// Account identifier.
    pub user_id: UserId,
    /// Account handle at issue time.
    pub username: Username,
}

impl From<&UserProfile> for TokenSubject {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.id,
            username: profile.username.clone(),
        }
    }
}

/// Decoded claims of a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Account identifier.
    pub user_id: UserId,
    /// Account handle; posts created with this token carry it as author.
    pub username: Username,
    /// Issue instant.
    pub issued_at: DateTime<Utc>,
    /// Expiry instant; the token is rejected from this moment on.
    pub expires_at: DateTime<Utc>,
}

/// Signed bearer token string.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap an encoded token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the encoded token.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Fresh bearer token.
    pub token: AuthToken,
    /// Public account fields.
    pub user: UserProfile,
}
