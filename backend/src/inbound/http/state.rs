//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend on domain ports
//! only and can be tested without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthCommand, PostsCommand, PostsQuery, TokenService};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Registration and login.
    pub auth: Arc<dyn AuthCommand>,
    /// Bearer token verification for the access guard.
    pub tokens: Arc<dyn TokenService>,
    /// Post mutations.
    pub posts: Arc<dyn PostsCommand>,
    /// Post listing.
    pub posts_query: Arc<dyn PostsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login.
    pub auth: Arc<dyn AuthCommand>,
    /// Bearer token verification for the access guard.
    pub tokens: Arc<dyn TokenService>,
    /// Post mutations.
    pub posts: Arc<dyn PostsCommand>,
    /// Post listing.
    pub posts_query: Arc<dyn PostsQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            tokens,
            posts,
            posts_query,
        } = ports;
        Self {
            auth,
            tokens,
            posts,
            posts_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
