mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use linkbottle::routes::router;
use sqlx::PgPool;

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::create_test_link(&pool, "Ab3xQ9", "http://example.com/page", None).await;
    let server = TestServer::new(router(common::create_test_state(pool.clone()))).unwrap();

    let response = server.get("/Ab3xQ9").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "http://example.com/page");
    assert_eq!(common::clicks_of(&pool, "Ab3xQ9").await, 1);
}

#[sqlx::test]
async fn test_redirect_counts_each_visit(pool: PgPool) {
    common::create_test_link(&pool, "cnt001", "http://example.com/", None).await;
    let server = TestServer::new(router(common::create_test_state(pool.clone()))).unwrap();

    for _ in 0..3 {
        server
            .get("/cnt001")
            .await
            .assert_status(StatusCode::TEMPORARY_REDIRECT);
    }

    assert_eq!(common::clicks_of(&pool, "cnt001").await, 3);
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = TestServer::new(router(common::create_test_state(pool))).unwrap();

    let response = server.get("/nonexistent").await;

    response.assert_status_not_found();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}
