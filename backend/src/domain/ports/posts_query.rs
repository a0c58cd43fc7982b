//! Driving port for the public post listing.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, PostPage};

/// Read side of the board.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// One page of posts, newest first, with its pagination block.
    async fn list_posts(&self, request: PageRequest) -> Result<PostPage, Error>;
}
