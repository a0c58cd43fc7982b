//! Posts API handlers.
//!
//! ```text
//! GET    /api/posts?page=2&limit=10
//! POST   /api/posts       {"title":"Hello","content":"World"}   (bearer)
//! PUT    /api/posts/{id}  {"title":"Hello","content":"Again"}   (bearer)
//! DELETE /api/posts/{id}                                        (bearer)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Pagination, PaginationQuery};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Post, PostContent, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, PaginationSchema};
use crate::inbound::http::state::HttpState;

/// Body accepted by create and update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PostRequest {
    #[schema(example = "Hello")]
    pub title: Option<String>,
    #[schema(example = "First post on the board.")]
    pub content: Option<String>,
}

impl PostRequest {
    fn into_content(self) -> Result<PostContent, Error> {
        PostContent::try_from_parts(self.title.as_deref(), self.content.as_deref())
            .map_err(Error::from)
    }
}

/// Wire shape of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub title: String,
    pub content: String,
    #[schema(example = "alice")]
    pub author: String,
    /// UTC, `YYYY-MM-DD HH:MM:SS`.
    #[schema(example = "2024-01-01 09:30:00")]
    pub created_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        let created_at = post.created_at_display();
        Self {
            id: post.id.get(),
            title: post.title,
            content: post.content,
            author: post.author.to_string(),
            created_at,
        }
    }
}

/// One page of posts with its position in the listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    #[schema(value_type = PaginationSchema)]
    pub pagination: Pagination,
}

/// Identifier of a freshly created post.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostCreatedResponse {
    #[schema(example = 16)]
    pub id: i64,
    #[schema(example = "post created")]
    pub message: String,
}

/// Post as stored after an update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostUpdatedResponse {
    #[schema(example = "post updated")]
    pub message: String,
    pub post: PostResponse,
}

/// Bare acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "post deleted")]
    pub message: String,
}

fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    PostId::parse(raw).ok_or_else(|| Error::not_found("post not found"))
}

/// List posts newest first.
///
/// Non-numeric or out-of-range `page`/`limit` values fall back to defaults
/// instead of failing.
#[utoipa::path(
    get,
    path = "/api/posts",
    params(
        ("page" = Option<String>, Query, description = "1-based page, default 1"),
        ("limit" = Option<String>, Query, description = "Page size, default 10, at most 100")
    ),
    responses(
        (status = 200, description = "Posts", body = PostListResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts",
    security([])
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    query: web::Query<PaginationQuery>,
) -> ApiResult<web::Json<PostListResponse>> {
    let page = state.posts_query.list_posts(query.to_request()).await?;
    Ok(web::Json(PostListResponse {
        posts: page.posts.into_iter().map(PostResponse::from).collect(),
        pagination: page.pagination,
    }))
}

/// Create a post authored by the caller.
///
/// Any `author` in the body is ignored; the token's username is used.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post created", body = PostCreatedResponse),
        (status = 400, description = "Title or content missing", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<PostRequest>,
) -> ApiResult<HttpResponse> {
    let content = payload.into_inner().into_content()?;
    let id = state.posts.create_post(user.username(), content).await?;
    Ok(HttpResponse::Created().json(PostCreatedResponse {
        id: id.get(),
        message: "post created".to_owned(),
    }))
}

/// Replace the title and content of one of the caller's posts.
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostUpdatedResponse),
        (status = 400, description = "Title or content missing", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 403, description = "Post belongs to another user", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<PostRequest>,
) -> ApiResult<web::Json<PostUpdatedResponse>> {
    let content = payload.into_inner().into_content()?;
    let id = parse_post_id(&path)?;
    let post = state.posts.update_post(id, user.username(), content).await?;
    Ok(web::Json(PostUpdatedResponse {
        message: "post updated".to_owned(),
        post: post.into(),
    }))
}

/// Delete one of the caller's posts.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 403, description = "Post belongs to another user", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_post_id(&path)?;
    state.posts.delete_post(id, user.username()).await?;
    Ok(web::Json(MessageResponse {
        message: "post deleted".to_owned(),
    }))
}

#[cfg(test)]
mod tests;
