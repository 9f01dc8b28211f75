//! PostgreSQL implementation of the post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::sync::Arc;

use crate::domain::entities::{
    NewPost, Post, PostFilter, PostPatch, PostStatsSnapshot, SortOrder,
};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

/// Columns selected for every post read, with the author name joined in.
const POST_COLUMNS: &str = "p.id, p.author_id, a.display_name AS author_name, p.title, p.body, \
     p.published_at, p.created_at, p.updated_at";

/// PostgreSQL repository for posts and authors.
///
/// Uses bound parameters throughout; the dynamic listing filters are
/// assembled with [`QueryBuilder`] so user input never reaches the SQL text.
pub struct PgPostRepository {
    pool: Arc<PgPool>,
}

impl PgPostRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Appends the publish-policy predicate and the optional search/author
    /// filters to a query ending in `WHERE`-ready position.
    ///
    /// This is the SQL half of the publish policy; the in-memory half is
    /// [`Post::is_published`]. Both treat a future-dated timestamp as not
    /// yet published.
    fn push_published_filters<'a>(
        qb: &mut QueryBuilder<'a, Postgres>,
        filter: &'a PostFilter,
        now: DateTime<Utc>,
    ) {
        qb.push(" WHERE p.published_at IS NOT NULL AND p.published_at <= ");
        qb.push_bind(now);

        if !filter.search.is_empty() {
            let pattern = format!("%{}%", filter.search);
            qb.push(" AND (p.title ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR p.body ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        if !filter.author.is_empty() {
            qb.push(" AND a.display_name ILIKE ");
            qb.push_bind(format!("%{}%", filter.author));
        }
    }

    fn order_clause(sort: SortOrder) -> &'static str {
        match sort {
            SortOrder::Latest => " ORDER BY p.published_at DESC",
            SortOrder::Oldest => " ORDER BY p.published_at ASC",
            SortOrder::Title => " ORDER BY p.title ASC",
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    author_id: i64,
    author_name: String,
    title: String,
    body: String,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            author_id: row.author_id,
            author_name: row.author_name,
            title: row.title,
            body: row.body,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (author_id, title, body, published_at)
                VALUES ($1, $2, $3, $4)
                RETURNING id, author_id, title, body, published_at, created_at, updated_at
            )
            SELECT i.id, i.author_id, a.display_name AS author_name, i.title, i.body,
                   i.published_at, i.created_at, i.updated_at
            FROM inserted i
            JOIN authors a ON a.id = i.author_id
            "#,
        )
        .bind(new_post.author_id)
        .bind(&new_post.title)
        .bind(&new_post.body)
        .bind(new_post.published_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts p JOIN authors a ON a.id = p.author_id \
             WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, AppError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE posts SET updated_at = now()");

        if let Some(title) = &patch.title {
            qb.push(", title = ");
            qb.push_bind(title);
        }
        if let Some(body) = &patch.body {
            qb.push(", body = ");
            qb.push_bind(body);
        }
        if let Some(published_at) = &patch.published_at {
            qb.push(", published_at = ");
            qb.push_bind(published_at);
        }

        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING id");

        let updated = qb
            .build()
            .fetch_optional(self.pool.as_ref())
            .await?;

        if updated.is_none() {
            return Err(AppError::not_found(
                "Post not found",
                serde_json::json!({ "id": id }),
            ));
        }

        // Re-read to pick up the author join; the id was just confirmed.
        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::internal("Post vanished during update", serde_json::json!({ "id": id }))
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_published(
        &self,
        filter: &PostFilter,
        page: i64,
        page_size: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, AppError> {
        let offset = (page - 1) * page_size;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {POST_COLUMNS} FROM posts p JOIN authors a ON a.id = p.author_id"
        ));
        Self::push_published_filters(&mut qb, filter, now);
        qb.push(Self::order_clause(filter.sort));
        qb.push(" LIMIT ");
        qb.push_bind(page_size);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows: Vec<PostRow> = qb
            .build_query_as()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_published(
        &self,
        filter: &PostFilter,
        now: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT COUNT(*) FROM posts p JOIN authors a ON a.id = p.author_id",
        );
        Self::push_published_filters(&mut qb, filter, now);

        let row = qb.build().fetch_one(self.pool.as_ref()).await?;
        Ok(row.try_get::<i64, _>(0).map_err(map_row_error)?)
    }

    async fn list_all(&self, page: i64, page_size: i64) -> Result<Vec<Post>, AppError> {
        let offset = (page - 1) * page_size;

        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts p JOIN authors a ON a.id = p.author_id \
             ORDER BY p.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }

    async fn author_names(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT a.display_name FROM posts p \
             JOIN authors a ON a.id = p.author_id \
             WHERE p.published_at IS NOT NULL AND p.published_at <= $1 \
             ORDER BY a.display_name ASC",
        )
        .bind(now)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(names)
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<PostStatsSnapshot, AppError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total_posts,
                   COUNT(DISTINCT p.author_id) AS total_authors,
                   MAX(p.published_at) AS latest_post_date,
                   COUNT(*) FILTER (
                       WHERE date_trunc('month', p.published_at)
                           = date_trunc('month', $1::timestamptz)
                   ) AS posts_this_month
            FROM posts p
            WHERE p.published_at IS NOT NULL AND p.published_at <= $1
            "#,
        )
        .bind(now)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(PostStatsSnapshot {
            total_posts: row.try_get("total_posts").map_err(map_row_error)?,
            total_authors: row.try_get("total_authors").map_err(map_row_error)?,
            latest_post_date: row.try_get("latest_post_date").map_err(map_row_error)?,
            posts_this_month: row.try_get("posts_this_month").map_err(map_row_error)?,
        })
    }

    async fn recent_published(
        &self,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts p JOIN authors a ON a.id = p.author_id \
             WHERE p.published_at IS NOT NULL AND p.published_at <= $1 \
             ORDER BY p.published_at DESC LIMIT $2"
        ))
        .bind(now)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}

fn map_row_error(e: sqlx::Error) -> AppError {
    tracing::error!("row decode error: {e}");
    AppError::internal("Database error", serde_json::json!({}))
}
