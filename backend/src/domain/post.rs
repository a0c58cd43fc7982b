//! Board post model.

use std::fmt;

use chrono::{DateTime, Utc};
use pagination::Pagination;
use serde_json::json;

use super::Error;
use super::user::Username;

/// Rendering of `created_at` on the wire: UTC, second precision.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Storage-assigned post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(i64);

impl PostId {
    /// Wrap a storage-assigned identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse a path segment. Anything that is not a decimal integer yields
    /// `None`; callers treat that as a post that cannot exist.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self)
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation error for post bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostValidationError {
    field: &'static str,
}

impl PostValidationError {
    /// Name of the first missing field.
    pub fn field(&self) -> &'static str {
        self.field
    }
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("title and content are required")
    }
}

impl std::error::Error for PostValidationError {}

impl From<PostValidationError> for Error {
    fn from(value: PostValidationError) -> Self {
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": value.field, "code": "missing_field" }))
    }
}

/// Editable part of a post.
///
/// ## Invariants
/// - `title` and `content` are non-blank. Both are stored as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    title: String,
    content: String,
}

impl PostContent {
    /// Validate raw title and content.
    ///
    /// # Examples
    /// ```
    /// use board_backend::domain::PostContent;
    ///
    /// assert!(PostContent::try_from_parts(Some("Hello"), Some("")).is_err());
    /// let body = PostContent::try_from_parts(Some("Hello"), Some("World")).expect("valid");
    /// assert_eq!(body.title(), "Hello");
    /// ```
    pub fn try_from_parts(
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, PostValidationError> {
        let title = title
            .filter(|value| !value.trim().is_empty())
            .ok_or(PostValidationError { field: "title" })?;
        let content = content
            .filter(|value| !value.trim().is_empty())
            .ok_or(PostValidationError { field: "content" })?;
        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
        })
    }

    /// Post title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Post body.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Stored post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Identifier.
    pub id: PostId,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Username copied from the creator's token; never re-resolved.
    pub author: Username,
    /// Creation instant, fixed for the life of the post.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// `created_at` rendered with [`CREATED_AT_FORMAT`].
    pub fn created_at_display(&self) -> String {
        self.created_at.format(CREATED_AT_FORMAT).to_string()
    }

    /// Whether `requester` owns this post.
    pub fn is_authored_by(&self, requester: &Username) -> bool {
        &self.author == requester
    }
}

/// One page of posts together with its pagination block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    /// Posts on this page, newest first.
    pub posts: Vec<Post>,
    /// Position of this page within the listing.
    pub pagination: Pagination,
}

/// Outcome of an author-conditional mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedMutation<T> {
    /// The post existed, the requester owned it, and the change was applied.
    Applied(T),
    /// No post has the identifier.
    NotFound,
    /// The post exists but belongs to someone else. Nothing changed.
    NotOwner,
}
