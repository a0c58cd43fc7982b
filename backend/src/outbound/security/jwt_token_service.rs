//! HS256 JWT `TokenService`.
//!
//! Claims on the wire are `{userId, username, iat, exp}` in epoch seconds.
//! Expiry is judged against the injected clock rather than the library's
//! system-time check, so tests can mint tokens in the past.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AuthToken, TokenClaims, TokenSubject, UserId, Username};

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_TTL: &str = "7d";

/// Error returned when a lifetime string cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid token lifetime {input:?}: expected <n>s, <n>m, <n>h, <n>d or bare seconds")]
pub struct TokenTtlError {
    input: String,
}

/// Parse a lifetime such as `7d`, `12h`, `30m`, `45s` or `3600`.
///
/// # Examples
/// ```
/// use board_backend::outbound::security::parse_token_ttl;
///
/// assert_eq!(parse_token_ttl("7d").expect("valid").num_days(), 7);
/// assert_eq!(parse_token_ttl("90").expect("valid").num_seconds(), 90);
/// ```
pub fn parse_token_ttl(raw: &str) -> Result<TimeDelta, TokenTtlError> {
    let invalid = || TokenTtlError {
        input: raw.to_owned(),
    };
    let trimmed = raw.trim();
    let (digits, unit_seconds) = match trimmed.char_indices().last() {
        Some((index, 's')) => (&trimmed[..index], 1),
        Some((index, 'm')) => (&trimmed[..index], 60),
        Some((index, 'h')) => (&trimmed[..index], 3_600),
        Some((index, 'd')) => (&trimmed[..index], 86_400),
        Some(_) => (trimmed, 1),
        None => return Err(invalid()),
    };
    let amount: i64 = digits.parse().map_err(|_| invalid())?;
    if amount <= 0 {
        return Err(invalid());
    }
    amount
        .checked_mul(unit_seconds)
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(invalid)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireClaims {
    user_id: i64,
    username: String,
    iat: i64,
    exp: i64,
}

/// Token service signing with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtTokenService {
    /// Service signing with `secret`, issuing tokens valid for `ttl`.
    pub fn new(secret: &[u8], ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    fn timestamp(seconds: i64) -> Result<DateTime<Utc>, TokenError> {
        DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| TokenError::invalid("timestamp out of range"))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &TokenSubject) -> Result<AuthToken, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::signing("token lifetime overflows"))?;
        let claims = WireClaims {
            user_id: subject.user_id.get(),
            username: subject.username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AuthToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<WireClaims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        let claims = data.claims;

        if self.clock.utc().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(TokenClaims {
            user_id: UserId::new(claims.user_id)
                .map_err(|err| TokenError::invalid(err.to_string()))?,
            username: Username::new(&claims.username)
                .map_err(|err| TokenError::invalid(err.to_string()))?,
            issued_at: Self::timestamp(claims.iat)?,
            expires_at: Self::timestamp(claims.exp)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};
    use std::sync::Mutex;

    struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        fn advance(&self, delta: TimeDelta) {
            *self.0.lock().expect("clock lock") += delta;
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock(Mutex::new(start)))
    }

    fn service(clock: Arc<MutableClock>, secret: &str) -> JwtTokenService {
        JwtTokenService::new(secret.as_bytes(), TimeDelta::hours(1), clock)
    }

    fn subject() -> TokenSubject {
        TokenSubject {
            user_id: UserId::new(7).expect("valid id"),
            username: Username::new("alice").expect("valid username"),
        }
    }

    #[rstest]
    fn issued_tokens_verify_to_subject(clock: Arc<MutableClock>) {
        let tokens = service(clock, "s3cret");
        let token = tokens.issue(&subject()).expect("issue");
        let claims = tokens.verify(token.as_str()).expect("verify");
        assert_eq!(claims.user_id.get(), 7);
        assert_eq!(claims.username.as_str(), "alice");
        assert_eq!(claims.expires_at - claims.issued_at, TimeDelta::hours(1));
    }

    #[rstest]
    fn expiry_is_inclusive(clock: Arc<MutableClock>) {
        let tokens = service(clock.clone(), "s3cret");
        let token = tokens.issue(&subject()).expect("issue");

        clock.advance(TimeDelta::minutes(59));
        assert!(tokens.verify(token.as_str()).is_ok());

        clock.advance(TimeDelta::minutes(1));
        assert_eq!(tokens.verify(token.as_str()), Err(TokenError::Expired));
    }

    #[rstest]
    fn other_secret_is_invalid(clock: Arc<MutableClock>) {
        let token = service(clock.clone(), "first").issue(&subject()).expect("issue");
        let result = service(clock, "second").verify(token.as_str());
        assert!(matches!(result, Err(TokenError::Invalid { .. })));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.token")]
    #[case("eyJhbGciOiJIUzI1NiJ9.e30.bad")]
    fn malformed_tokens_are_invalid(clock: Arc<MutableClock>, #[case] token: &str) {
        let result = service(clock, "s3cret").verify(token);
        assert!(matches!(result, Err(TokenError::Invalid { .. })));
    }

    #[rstest]
    fn wire_claims_use_camel_case(clock: Arc<MutableClock>) {
        let tokens = service(clock, "s3cret");
        let token = tokens.issue(&subject()).expect("issue");
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let raw = decode::<serde_json::Value>(
            token.as_str(),
            &DecodingKey::from_secret(b"s3cret"),
            &validation,
        )
        .expect("decode");
        for key in ["userId", "username", "iat", "exp"] {
            assert!(raw.claims.get(key).is_some(), "missing {key}");
        }
    }

    #[rstest]
    #[case("7d", 7 * 86_400)]
    #[case("12h", 12 * 3_600)]
    #[case("30m", 1_800)]
    #[case("45s", 45)]
    #[case(" 3600 ", 3_600)]
    fn ttl_shorthand_parses(#[case] raw: &str, #[case] seconds: i64) {
        assert_eq!(
            parse_token_ttl(raw).expect("valid ttl").num_seconds(),
            seconds
        );
    }

    #[rstest]
    #[case("")]
    #[case("d")]
    #[case("-1h")]
    #[case("0")]
    #[case("1w")]
    #[case("1.5h")]
    fn ttl_garbage_is_rejected(#[case] raw: &str) {
        assert!(parse_token_ttl(raw).is_err());
    }
}
