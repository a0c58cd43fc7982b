//! Builders wiring adapters and services into [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;

use crate::domain::ports::{PostRepository, UserRepository};
use crate::domain::{AuthService, PostsService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
use crate::outbound::persistence::{DieselPostRepository, DieselUserRepository};
use crate::outbound::security::{BcryptPasswordHasher, JwtTokenService};

use super::ServerConfig;

fn assemble<U, P>(
    config: &ServerConfig,
    users: U,
    posts: P,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
{
    let tokens = Arc::new(JwtTokenService::new(
        &config.jwt_secret,
        config.token_ttl,
        clock,
    ));
    let hasher = Arc::new(BcryptPasswordHasher::with_cost(config.bcrypt_cost));
    let auth = Arc::new(AuthService::new(Arc::new(users), hasher, tokens.clone()));
    let posts = Arc::new(PostsService::new(Arc::new(posts)));

    HttpState::new(HttpStatePorts {
        auth,
        tokens,
        posts: posts.clone(),
        posts_query: posts,
    })
}

/// Build handler state for the configured storage.
///
/// Uses the Diesel adapters when a pool is configured and the in-memory
/// adapters otherwise. `clock` drives token timestamps and in-memory post
/// creation times.
pub fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => assemble(
            config,
            DieselUserRepository::new(pool.clone()),
            DieselPostRepository::new(pool.clone()),
            clock,
        ),
        None => assemble(
            config,
            InMemoryUserRepository::new(),
            InMemoryPostRepository::new(clock.clone()),
            clock,
        ),
    };
    web::Data::new(state)
}
