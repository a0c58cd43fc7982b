//! Credential adapters: bcrypt password hashing and HS256 bearer tokens.

mod bcrypt_password_hasher;
mod jwt_token_service;

pub use bcrypt_password_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
pub use jwt_token_service::{DEFAULT_TOKEN_TTL, JwtTokenService, TokenTtlError, parse_token_ttl};
