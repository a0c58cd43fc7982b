//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP path from the inbound layer, the schema
//! wrappers from [`crate::inbound::http::schemas`] and the bearer security
//! scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::accounts::{AuthResponse, LoginRequest, RegisterRequest};
use crate::inbound::http::posts::{
    MessageResponse, PostCreatedResponse, PostListResponse, PostRequest, PostResponse,
    PostUpdatedResponse,
};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, PaginationSchema, UserProfileSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Board backend API",
        description = "Account registration, bearer login and an ownership-checked posts board."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserProfileSchema,
        PaginationSchema,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        PostRequest,
        PostResponse,
        PostListResponse,
        PostCreatedResponse,
        PostUpdatedResponse,
        MessageResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "posts", description = "Board posts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
