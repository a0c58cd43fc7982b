//! Driving port for post mutations.
//!
//! Every operation takes the requester's username from verified token
//! claims. Ownership is exact string equality with the stored author.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostContent, PostId, Username};

/// Create, edit and delete posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Store a new post authored by `author`.
    async fn create_post(&self, author: &Username, content: PostContent) -> Result<PostId, Error>;

    /// Replace title and content of a post the requester owns.
    ///
    /// Missing posts fail with not-found before ownership is considered.
    async fn update_post(
        &self,
        id: PostId,
        requester: &Username,
        content: PostContent,
    ) -> Result<Post, Error>;

    /// Delete a post the requester owns.
    async fn delete_post(&self, id: PostId, requester: &Username) -> Result<(), Error>;
}
