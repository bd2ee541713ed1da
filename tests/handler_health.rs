mod common;

use async_trait::async_trait;
use axum_test::TestServer;
use linkbottle::infrastructure::cache::{CacheError, CacheResult, CacheService};
use linkbottle::routes::router;
use sqlx::PgPool;
use std::sync::Arc;

/// Cache backend that is configured but cannot be reached.
struct DownCache;

#[async_trait]
impl CacheService for DownCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("redis unreachable".into()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: u64) -> CacheResult<()> {
        Err(CacheError::ConnectionError("redis unreachable".into()))
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Err(CacheError::ConnectionError("redis unreachable".into()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[sqlx::test]
async fn test_health_endpoint_success(pool: PgPool) {
    let server = TestServer::new(router(common::create_test_state(pool))).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[sqlx::test]
async fn test_health_reports_closed_database(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    pool.close().await;
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_service_unavailable();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}

#[sqlx::test]
async fn test_health_stays_up_when_cache_is_down(pool: PgPool) {
    let state = common::create_test_state_with_cache(pool, Arc::new(DownCache));
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "error");
    assert_eq!(json["checks"]["cache"]["message"], "redis unreachable");
}
