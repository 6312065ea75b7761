/*
 * Responsibility
 * - PostStore の Postgres 実装
 * - document は JSONB 1 カラムに丸ごと保存、キーは BIGSERIAL (再利用されない)
 * - schema は migrations/ を sqlx::migrate! で適用
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, postgres::PgPoolOptions, types::Json};

use crate::repos::error::RepoResult;
use crate::repos::post_repo::{PostDocument, PostRow, PostStore};

#[derive(Debug, sqlx::FromRow)]
struct PgPostRow {
    #[sqlx(rename = "postId")]
    post_id: i64,

    document: Json<PostDocument>,

    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl From<PgPostRow> for PostRow {
    fn from(row: PgPostRow) -> Self {
        Self {
            post_id: row.post_id,
            document: row.document.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects, then brings the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> RepoResult<Vec<PostRow>> {
        let rows = sqlx::query_as::<_, PgPostRow>(
            r#"
            SELECT "postId", document, "createdAt", "updatedAt"
            FROM posts
            ORDER BY "postId" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::from).collect())
    }

    async fn get(&self, post_id: i64) -> RepoResult<Option<PostRow>> {
        let row = sqlx::query_as::<_, PgPostRow>(
            r#"
            SELECT "postId", document, "createdAt", "updatedAt"
            FROM posts
            WHERE "postId" = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::from))
    }

    async fn create(&self, document: &PostDocument) -> RepoResult<PostRow> {
        let row = sqlx::query_as::<_, PgPostRow>(
            r#"
            INSERT INTO posts (document)
            VALUES ($1)
            RETURNING "postId", document, "createdAt", "updatedAt"
            "#,
        )
        .bind(Json(document))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(
        &self,
        post_id: i64,
        document: &PostDocument,
    ) -> RepoResult<Option<PostRow>> {
        let row = sqlx::query_as::<_, PgPostRow>(
            r#"
            UPDATE posts
            SET
                document = $2,
                "updatedAt" = now()
            WHERE "postId" = $1
            RETURNING "postId", document, "createdAt", "updatedAt"
            "#,
        )
        .bind(post_id)
        .bind(Json(document))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::from))
    }

    async fn delete(&self, post_id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE "postId" = $1
            "#,
        )
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
