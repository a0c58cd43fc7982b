//! Account API handlers.
//!
//! ```text
//! POST /api/auth/register {"username":"alice","email":"alice@example.com","password":"secret1"}
//! POST /api/auth/login {"email":"alice@example.com","password":"secret1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthSession, LoginCredentials, RegistrationRequest, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserProfileSchema};
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/auth/register`.
///
/// Fields are optional on the wire so an absent field is reported as
/// `invalid_request` rather than a deserialisation failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// Login body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// Token and public profile returned by register and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "login successful")]
    pub message: String,
    /// Bearer token for protected endpoints.
    pub token: String,
    #[schema(value_type = UserProfileSchema)]
    pub user: UserProfile,
}

impl AuthResponse {
    fn from_session(message: &str, session: AuthSession) -> Self {
        Self {
            message: message.to_owned(),
            token: session.token.into(),
            user: session.user,
        }
    }
}

/// Create an account and issue its first token.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing field or short password", body = ErrorSchema),
        (status = 409, description = "Email or username already exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = RegistrationRequest::try_from_parts(
        body.username.as_deref(),
        body.email.as_deref(),
        body.password.as_deref(),
    )?;
    let session = state.auth.register(request).await?;
    Ok(HttpResponse::Created().json(AuthResponse::from_session("registration successful", session)))
}

/// Exchange credentials for a fresh token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Missing email or password", body = ErrorSchema),
        (status = 401, description = "Email or password is incorrect", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let body = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(body.email.as_deref(), body.password.as_deref())?;
    let session = state.auth.login(credentials).await?;
    Ok(web::Json(AuthResponse::from_session("login successful", session)))
}
