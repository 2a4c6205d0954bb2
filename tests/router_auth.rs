mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chatvault::crypto::token::TokenService;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_message(authorization: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/sessions/1/messages")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::from(r#"{"text":"hi"}"#)).unwrap()
}

#[tokio::test]
async fn message_without_token_is_unauthorized() {
    let response = common::test_app().oneshot(post_message(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    let body = body_json(response).await;
    assert_eq!(body["error"], "Not authenticated");
}

#[tokio::test]
async fn message_with_garbage_token_is_unauthorized() {
    let response = common::test_app()
        .oneshot(post_message(Some("Bearer not-a-jwt".to_string())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_from_another_secret_is_unauthorized() {
    let foreign = TokenService::new(
        b"some-other-secret-some-other-secret",
        chrono::Duration::minutes(5),
    );
    let token = foreign.issue("a@x.com").unwrap();

    let response = common::test_app()
        .oneshot(post_message(Some(format!("Bearer {}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_for_unregistered_subject_is_unauthorized() {
    let tokens = TokenService::new(
        common::TEST_SECRET.as_bytes(),
        chrono::Duration::minutes(5),
    );
    let token = tokens.issue("ghost@x.com").unwrap();

    let response = common::test_app()
        .oneshot(post_message(Some(format!("Bearer {}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_and_session_creation_require_a_token() {
    let list = Request::builder()
        .uri("/sessions/1/messages")
        .body(Body::empty())
        .unwrap();
    let response = common::test_app().oneshot(list).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let create = Request::builder()
        .method("POST")
        .uri("/sessions")
        .body(Body::empty())
        .unwrap();
    let response = common::test_app().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_email_is_rejected_on_registration() {
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"email":"not-an-email","password":"pw1"}"#))
        .unwrap();

    let response = common::test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_message_without_token_is_unauthorized() {
    let request = Request::builder()
        .method("POST")
        .uri("/sessions/1/messages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = common::test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_missing_password_is_a_json_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"email":"a@x.com"}"#))
        .unwrap();

    let response = common::test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn registration_without_content_type_is_a_json_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .body(Body::from(r#"{"email":"a@x.com","password":"pw1"}"#))
        .unwrap();

    let response = common::test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn login_missing_password_is_a_json_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=a%40x.com"))
        .unwrap();

    let response = common::test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("password"));
}
