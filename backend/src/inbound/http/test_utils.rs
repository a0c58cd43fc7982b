//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use chrono::{TimeZone, Utc};

use crate::domain::ports::{
    MockAuthCommand, MockPostsCommand, MockPostsQuery, MockTokenService,
};
use crate::domain::{TokenClaims, UserId, Username};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mock ports used to assemble an [`HttpState`] for handler tests.
///
/// Each mock starts without expectations, so any unexpected call fails the
/// test.
#[derive(Default)]
pub struct MockPorts {
    pub auth: MockAuthCommand,
    pub tokens: MockTokenService,
    pub posts: MockPostsCommand,
    pub posts_query: MockPostsQuery,
}

impl MockPorts {
    /// Wrap the mocks into handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            auth: Arc::new(self.auth),
            tokens: Arc::new(self.tokens),
            posts: Arc::new(self.posts),
            posts_query: Arc::new(self.posts_query),
        }))
    }
}

/// Claims the token mock hands back for `username`.
pub fn claims_for(username: &str) -> TokenClaims {
    let issued_at = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    TokenClaims {
        user_id: UserId::new(1).expect("valid id"),
        username: Username::new(username).expect("valid username"),
        issued_at,
        expires_at: issued_at + chrono::TimeDelta::days(7),
    }
}

/// Token mock that accepts exactly `token` and maps it to `username`.
pub fn accepting_tokens(token: &'static str, username: &'static str) -> MockTokenService {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_verify()
        .withf(move |candidate| candidate == token)
        .returning(move |_| Ok(claims_for(username)));
    tokens
}
