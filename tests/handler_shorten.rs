mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use linkbottle::routes::router;
use serde_json::json;
use sqlx::PgPool;

fn make_server(pool: PgPool) -> TestServer {
    TestServer::new(router(common::create_test_state(pool))).unwrap()
}

#[sqlx::test]
async fn test_shorten_authenticated(pool: PgPool) {
    let owner = common::create_test_user(&pool, "alice").await;
    let server = make_server(pool);

    let response = server
        .post("/api/shorten")
        .add_header("Authorization", common::bearer(&common::token_for(owner, "alice")))
        .json(&json!({ "url": "http://example.com/page", "title": "Example" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    let code = body["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert_eq!(body["alias"], code);
    assert_eq!(body["owner_id"], owner);
    assert_eq!(body["clicks"], 0);
    assert_eq!(body["short_url"], format!("{}/{}", common::TEST_BASE_URL, code));
}

#[sqlx::test]
async fn test_shorten_anonymous(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "http://example.com/page", "title": "Example" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<serde_json::Value>();
    assert!(body["owner_id"].is_null());
}

#[sqlx::test]
async fn test_shorten_invalid_token_rejected(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/api/shorten")
        .add_header("Authorization", "Bearer not-a-jwt")
        .json(&json!({ "url": "http://example.com/page" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[sqlx::test]
async fn test_shorten_falls_back_to_default_title(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": common::UNREACHABLE_URL }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<serde_json::Value>()["title"], "No Title");
}

#[sqlx::test]
async fn test_shorten_with_alias(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "http://example.com/", "alias": "my-page", "title": "t" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["alias"], "my-page");

    // the alias is globally taken now
    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "http://other.com/", "alias": "my-page", "title": "t" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "duplicate alias"
    );
}

#[sqlx::test]
async fn test_shorten_duplicate_url_for_owner(pool: PgPool) {
    let owner = common::create_test_user(&pool, "alice").await;
    let token = common::token_for(owner, "alice");
    let server = make_server(pool);

    let request = json!({ "url": "http://example.com/page", "title": "t" });
    server
        .post("/api/shorten")
        .add_header("Authorization", common::bearer(&token))
        .json(&request)
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/shorten")
        .add_header("Authorization", common::bearer(&token))
        .json(&request)
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "duplicate URL for owner"
    );
}

#[sqlx::test]
async fn test_shorten_validation_errors(pool: PgPool) {
    let server = make_server(pool);

    for payload in [
        json!({ "url": "not-a-url" }),
        json!({ "url": "ftp://example.com/file" }),
        json!({ "url": "http://example.com/", "alias": "no spaces" }),
        json!({ "url": "http://example.com/", "alias": "health" }),
        json!({ "url": "" }),
    ] {
        server
            .post("/api/shorten")
            .json(&payload)
            .await
            .assert_status_bad_request();
    }
}
