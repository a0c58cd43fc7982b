//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module mirrors their serialised shape in the inbound adapter, where
//! framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Missing or malformed input.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Missing, invalid or expired credentials.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not the owner of the resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Uniqueness violation.
    #[schema(rename = "conflict")]
    Conflict,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Summary of the failure.
    #[schema(example = "post not found")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Underlying cause, present on internal errors.
    message: Option<String>,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::UserProfile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserProfile)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserProfileSchema {
    /// Account identifier.
    #[schema(example = 1)]
    id: i64,
    /// Account handle.
    #[schema(example = "alice")]
    username: String,
    /// Contact address.
    #[schema(example = "alice@example.com")]
    email: String,
}

/// OpenAPI schema for [`pagination::Pagination`].
#[derive(ToSchema)]
#[schema(as = pagination::Pagination, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PaginationSchema {
    /// Page that was served.
    #[schema(example = 2)]
    current_page: u32,
    /// `ceil(total_posts / posts_per_page)`, zero when there are no posts.
    #[schema(example = 2)]
    total_pages: u64,
    /// Number of posts across all pages.
    #[schema(example = 15)]
    total_posts: u64,
    /// Page size after clamping.
    #[schema(example = 10)]
    posts_per_page: u32,
    /// Whether a later page exists.
    has_next_page: bool,
    /// Whether an earlier page exists.
    has_previous_page: bool,
}
