//! Tests for posts API handlers.

use super::*;
use crate::domain::{PostPage, Username};
use crate::inbound::http::test_utils::{MockPorts, accepting_tokens};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use pagination::PageRequest;
use rstest::rstest;
use serde_json::{Value, json};

const TOKEN: &str = "alice-token";

fn authed_ports() -> MockPorts {
    MockPorts {
        tokens: accepting_tokens(TOKEN, "alice"),
        ..MockPorts::default()
    }
}

fn post(id: i64, author: &str) -> Post {
    Post {
        id: PostId::new(id),
        title: "Hello".to_owned(),
        content: "World".to_owned(),
        author: Username::new(author).expect("valid username"),
        created_at: Utc
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("valid timestamp"),
    }
}

async fn send(
    ports: MockPorts,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new().app_data(ports.into_state()).service(
            web::scope("/api")
                .service(list_posts)
                .service(create_post)
                .service(update_post)
                .service(delete_post),
        ),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

fn bearer(request: actix_test::TestRequest) -> actix_test::TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {TOKEN}")))
}

#[rstest]
#[actix_web::test]
async fn list_serialises_posts_and_pagination() {
    let mut ports = MockPorts::default();
    ports
        .posts_query
        .expect_list_posts()
        .withf(|request| request.page() == 2 && request.limit() == 100)
        .times(1)
        .return_once(|request| {
            Ok(PostPage {
                posts: vec![post(3, "alice")],
                pagination: Pagination::compute(request, 101),
            })
        });

    let (status, body) = send(
        ports,
        actix_test::TestRequest::get().uri("/api/posts?page=2&limit=500"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["posts"][0],
        json!({
            "id": 3,
            "title": "Hello",
            "content": "World",
            "author": "alice",
            "created_at": "2024-03-09 07:05:01",
        })
    );
    assert_eq!(body["pagination"]["currentPage"], 2);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["hasNextPage"], false);
    assert_eq!(body["pagination"]["hasPreviousPage"], true);
}

#[rstest]
#[actix_web::test]
async fn list_falls_back_to_defaults_for_garbage_query() {
    let mut ports = MockPorts::default();
    ports
        .posts_query
        .expect_list_posts()
        .withf(|request| *request == PageRequest::default())
        .return_once(|request| {
            Ok(PostPage {
                posts: Vec::new(),
                pagination: Pagination::compute(request, 0),
            })
        });

    let (status, body) = send(
        ports,
        actix_test::TestRequest::get().uri("/api/posts?page=abc&limit=-4"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"], json!([]));
    assert_eq!(body["pagination"]["totalPages"], 0);
}

#[rstest]
#[actix_web::test]
async fn create_uses_token_username_not_body_author() {
    let mut ports = authed_ports();
    ports
        .posts
        .expect_create_post()
        .withf(|author, content| author.as_str() == "alice" && content.title() == "Hello")
        .times(1)
        .return_once(|_, _| Ok(PostId::new(16)));

    let (status, body) = send(
        ports,
        bearer(actix_test::TestRequest::post().uri("/api/posts")).set_json(json!({
            "title": "Hello",
            "content": "World",
            "author": "mallory",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 16, "message": "post created"}));
}

#[rstest]
#[actix_web::test]
async fn create_without_token_is_unauthorised() {
    let (status, body) = send(
        MockPorts::default(),
        actix_test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"title": "Hello", "content": "World"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "authentication token is missing");
}

#[rstest]
#[case(json!({"title": "Hello"}))]
#[case(json!({"content": "World"}))]
#[case(json!({"title": " ", "content": "World"}))]
#[actix_web::test]
async fn create_requires_title_and_content(#[case] payload: Value) {
    let (status, body) = send(
        authed_ports(),
        bearer(actix_test::TestRequest::post().uri("/api/posts")).set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title and content are required");
}

#[rstest]
#[actix_web::test]
async fn update_returns_stored_post() {
    let mut ports = authed_ports();
    ports
        .posts
        .expect_update_post()
        .withf(|id, requester, content| {
            id.get() == 3 && requester.as_str() == "alice" && content.content() == "World"
        })
        .times(1)
        .return_once(|_, _, _| Ok(post(3, "alice")));

    let (status, body) = send(
        ports,
        bearer(actix_test::TestRequest::put().uri("/api/posts/3"))
            .set_json(json!({"title": "Hello", "content": "World"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "post updated");
    assert_eq!(body["post"]["id"], 3);
    assert_eq!(body["post"]["author"], "alice");
}

#[rstest]
#[actix_web::test]
async fn update_validates_body_before_id() {
    let (status, body) = send(
        authed_ports(),
        bearer(actix_test::TestRequest::put().uri("/api/posts/abc")).set_json(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[case(actix_test::TestRequest::put().set_json(json!({"title": "t", "content": "c"})))]
#[case(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn non_numeric_ids_are_not_found(#[case] request: actix_test::TestRequest) {
    let (status, body) = send(authed_ports(), bearer(request.uri("/api/posts/abc"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "post not found");
}

#[rstest]
#[actix_web::test]
async fn delete_forwards_ownership_failures() {
    let mut ports = authed_ports();
    ports
        .posts
        .expect_delete_post()
        .withf(|id, requester| id.get() == 9 && requester.as_str() == "alice")
        .return_once(|_, _| Err(Error::forbidden("you can only delete your own posts")));

    let (status, body) = send(
        ports,
        bearer(actix_test::TestRequest::delete().uri("/api/posts/9")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "you can only delete your own posts");
}

#[rstest]
#[actix_web::test]
async fn delete_acknowledges_success() {
    let mut ports = authed_ports();
    ports
        .posts
        .expect_delete_post()
        .return_once(|_, _| Ok(()));

    let (status, body) = send(
        ports,
        bearer(actix_test::TestRequest::delete().uri("/api/posts/9")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "post deleted"}));
}
