use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::{Comment, Post};
use crate::infrastructure::db::PgPool;

pub struct SqlxPostRepository {
    pub pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn post_from_row(r: &PgRow) -> Post {
    Post {
        id: r.get("id"),
        body: r.get("body"),
        user_id: r.get("user_id"),
    }
}

fn comment_from_row(r: &PgRow) -> Comment {
    Comment {
        id: r.get("id"),
        body: r.get("body"),
        post_id: r.get("post_id"),
        user_id: r.get("user_id"),
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create_post(&self, user_id: i64, body: &str) -> anyhow::Result<Post> {
        let row = sqlx::query(
            r#"INSERT INTO posts (body, user_id) VALUES ($1, $2)
               RETURNING id, body, user_id"#,
        )
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(post_from_row(&row))
    }

    async fn list_posts(&self) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query(r#"SELECT id, body, user_id FROM posts ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn find_post(&self, id: i64) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query(r#"SELECT id, body, user_id FROM posts WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(post_from_row))
    }

    async fn create_comment(
        &self,
        user_id: i64,
        post_id: i64,
        body: &str,
    ) -> anyhow::Result<Comment> {
        let row = sqlx::query(
            r#"INSERT INTO comments (body, post_id, user_id) VALUES ($1, $2, $3)
               RETURNING id, body, post_id, user_id"#,
        )
        .bind(body)
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment_from_row(&row))
    }

    async fn list_comments(&self, post_id: i64) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"SELECT id, body, post_id, user_id FROM comments WHERE post_id = $1 ORDER BY id"#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(comment_from_row).collect())
    }
}
