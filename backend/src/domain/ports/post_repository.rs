//! Port for post persistence.
//!
//! Mutations are conditional on authorship so that ownership is decided by
//! the same statement that applies the change.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{OwnedMutation, Post, PostContent, PostId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// A window of posts plus the size of the whole listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSlice {
    /// Posts in the requested window, newest first.
    pub posts: Vec<Post>,
    /// Number of posts across every page.
    pub total: u64,
}

/// Post store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts ordered by `created_at` descending, ties broken by id
    /// descending, windowed by `request`.
    async fn list(&self, request: PageRequest) -> Result<PostSlice, PostRepositoryError>;

    /// Persist a post stamped with `author` and the current time.
    async fn insert(
        &self,
        author: &Username,
        content: &PostContent,
    ) -> Result<PostId, PostRepositoryError>;

    /// Overwrite title and content when `author` owns post `id`.
    async fn update_owned(
        &self,
        id: PostId,
        author: &Username,
        content: &PostContent,
    ) -> Result<OwnedMutation<Post>, PostRepositoryError>;

    /// Remove post `id` when `author` owns it.
    async fn delete_owned(
        &self,
        id: PostId,
        author: &Username,
    ) -> Result<OwnedMutation<()>, PostRepositoryError>;
}
