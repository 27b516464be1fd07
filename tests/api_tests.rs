//! End-to-end tests of the JSON API under `/api`

use axum::http::StatusCode;
use axum_test::TestServer;
use bookshelf::prelude::*;
use serde_json::{Value, json};

fn create_test_server() -> TestServer {
    let router = ServerBuilder::new()
        .build()
        .expect("Failed to build app");
    TestServer::new(router).expect("Failed to create test server")
}

async fn signup_and_login(server: &TestServer) -> String {
    server
        .post("/api/users/signup")
        .json(&json!({"username": "ann", "email": "ann@x.com", "password": "longpass1"}))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/users/login")
        .json(&json!({"username": "ann", "password": "longpass1"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["user"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_signup_login_then_list_books() {
    let server = create_test_server();
    let token = signup_and_login(&server).await;

    let response = server.get("/api/books/").authorization_bearer(&token).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({"books": []}));

    server
        .get("/api/books/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_envelope_has_string_token_and_no_hash() {
    let server = create_test_server();

    let response = server
        .post("/api/users/signup")
        .json(&json!({"username": "ann", "email": "ann@x.com", "password": "longpass1"}))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["user"]["username"], "ann");
    assert!(body["user"]["token"].is_string());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_short_password_rejected() {
    let server = create_test_server();

    let response = server
        .post("/api/users/signup")
        .json(&json!({"username": "ann", "email": "ann@x.com", "password": "short"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["fields"][0]["field"], "password");
}

#[tokio::test]
async fn test_bad_credentials_unauthorized() {
    let server = create_test_server();
    signup_and_login(&server).await;

    server
        .post("/api/users/login")
        .json(&json!({"username": "ann", "password": "wrongpass"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_unauthorized() {
    let server = create_test_server();

    server
        .get("/api/authors/")
        .authorization_bearer("not.a.token")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_read_and_update() {
    let server = create_test_server();
    let token = signup_and_login(&server).await;

    let me: Value = server
        .get("/api/user/")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(me["user"]["email"], "ann@x.com");

    let response = server
        .put("/api/user/")
        .authorization_bearer(&token)
        .json(&json!({"first_name": "Ann", "email": "ann@example.org"}))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["user"]["first_name"], "Ann");
    assert_eq!(updated["user"]["email"], "ann@example.org");
    assert!(updated["user"]["token"].is_string());
}

#[tokio::test]
async fn test_book_and_author_shapes() {
    let server = create_test_server();
    let token = signup_and_login(&server).await;

    server
        .post("/authors/")
        .authorization_bearer(&token)
        .json(&json!({"first_name": "Ann", "last_name": "Leckie", "description": "bio"}))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/books/")
        .authorization_bearer(&token)
        .json(&json!({
            "title": "Ancillary Justice",
            "isbn13": "9780316246620",
            "description": "Breq"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let list: Value = server
        .get("/api/books/")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(
        list,
        json!({"books": [{
            "id": 1,
            "isbn13": "9780316246620",
            "title": "Ancillary Justice",
            "authors": [1]
        }]})
    );

    let detail: Value = server
        .get("/api/books/1")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(detail["book"]["description"], "Breq");

    let author: Value = server
        .get("/api/authors/1")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(
        author,
        json!({"author": {"id": 1, "first_name": "Ann", "last_name": "Leckie"}})
    );

    let authors: Value = server
        .get("/api/authors/")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(authors["authors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_book_is_404() {
    let server = create_test_server();
    let token = signup_and_login(&server).await;

    server
        .get("/api/books/9")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/books/abc")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
