#![allow(dead_code)]

use chrono::Duration as TokenTtl;
use linkbottle::domain::entities::{Principal, Role};
use linkbottle::infrastructure::cache::{CacheService, NullCache};
use linkbottle::infrastructure::identity::JwtIdentityProvider;
use linkbottle::infrastructure::metadata::HttpTitleFetcher;
use linkbottle::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_BASE_URL: &str = "http://sho.rt";

/// A destination on a closed local port: title lookups fail fast.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9/page";

pub async fn create_test_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (username) VALUES ($1) RETURNING id")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_link(
    pool: &PgPool,
    code: &str,
    url: &str,
    owner_id: Option<i64>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (short_code, alias, title, original_url, owner_id)
         VALUES ($1, $1, 'Test', $2, $3)
         RETURNING id",
    )
    .bind(code)
    .bind(url)
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn clicks_of(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM links WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_exists(pool: &PgPool, code: &str) -> bool {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM links WHERE short_code = $1)")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn token_for(user_id: i64, username: &str) -> String {
    JwtIdentityProvider::new(TEST_JWT_SECRET)
        .issue(
            &Principal::new(user_id, username, Role::User),
            TokenTtl::minutes(5),
        )
        .unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_cache(pool, Arc::new(NullCache::new()))
}

pub fn create_test_state_with_cache(pool: PgPool, cache: Arc<dyn CacheService>) -> AppState {
    AppState::new(
        Arc::new(pool),
        cache,
        60,
        HttpTitleFetcher::new(Duration::from_secs(2)).unwrap(),
        Some("No Title".to_string()),
        Arc::new(JwtIdentityProvider::new(TEST_JWT_SECRET)),
        TEST_BASE_URL,
    )
}
