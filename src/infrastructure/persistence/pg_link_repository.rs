//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str =
    "id, short_code, alias, title, original_url, owner_id, created_at, clicks";

#[derive(FromRow)]
struct LinkRow {
    id: i64,
    short_code: String,
    alias: String,
    title: String,
    original_url: String,
    owner_id: Option<i64>,
    created_at: DateTime<Utc>,
    clicks: i64,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.short_code,
            r.alias,
            r.title,
            r.original_url,
            r.owner_id,
            r.created_at,
            r.clicks,
        )
    }
}

fn link_not_found(id: i64) -> AppError {
    AppError::not_found("Link not found", json!({ "id": id }))
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness is enforced by table constraints and the cross-namespace
/// trigger from `migrations/`; every mutation is a single statement, so
/// PostgreSQL row locking serializes concurrent writers of the same record.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_optional(
        &self,
        query: sqlx::query::QueryAs<'_, sqlx::Postgres, LinkRow, sqlx::postgres::PgArguments>,
    ) -> Result<Option<Link>, AppError> {
        Ok(query
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(Link::from))
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (short_code, alias, title, original_url, owner_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(new_link.short_code)
            .bind(new_link.alias)
            .bind(new_link.title)
            .bind(new_link.original_url)
            .bind(new_link.owner_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1");
        self.fetch_optional(sqlx::query_as(&sql).bind(code)).await
    }

    async fn find_by_code_for_owner(
        &self,
        code: &str,
        owner_id: i64,
    ) -> Result<Option<Link>, AppError> {
        let sql =
            format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1 AND owner_id = $2");
        self.fetch_optional(sqlx::query_as(&sql).bind(code).bind(owner_id))
            .await
    }

    async fn find_by_url_for_owner(
        &self,
        original_url: &str,
        owner_id: i64,
    ) -> Result<Option<Link>, AppError> {
        let sql =
            format!("SELECT {LINK_COLUMNS} FROM links WHERE original_url = $1 AND owner_id = $2");
        self.fetch_optional(sqlx::query_as(&sql).bind(original_url).bind(owner_id))
            .await
    }

    async fn find_by_key(
        &self,
        key: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links
             WHERE (short_code = $1 OR alias = $1)
               AND ($2::bigint IS NULL OR id <> $2)
             LIMIT 1"
        );
        self.fetch_optional(sqlx::query_as(&sql).bind(key).bind(exclude_id))
            .await
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links
             WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(owner_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let sql = format!(
            "UPDATE links SET
                title = COALESCE($2, title),
                alias = COALESCE($3, alias),
                original_url = COALESCE($4, original_url)
             WHERE id = $1
             RETURNING {LINK_COLUMNS}"
        );

        self.fetch_optional(
            sqlx::query_as(&sql)
                .bind(id)
                .bind(patch.title)
                .bind(patch.alias)
                .bind(patch.original_url),
        )
        .await?
        .ok_or_else(|| link_not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(link_not_found(id));
        }

        Ok(())
    }

    async fn increment_clicks(&self, id: i64) -> Result<Link, AppError> {
        let sql = format!(
            "UPDATE links SET clicks = clicks + 1
             WHERE id = $1
             RETURNING {LINK_COLUMNS}"
        );

        self.fetch_optional(sqlx::query_as(&sql).bind(id))
            .await?
            .ok_or_else(|| link_not_found(id))
    }
}
