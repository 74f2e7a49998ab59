use async_trait::async_trait;

use crate::domain::posts::post::{Comment, Post};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, user_id: i64, body: &str) -> anyhow::Result<Post>;
    async fn list_posts(&self) -> anyhow::Result<Vec<Post>>;
    async fn find_post(&self, id: i64) -> anyhow::Result<Option<Post>>;
    async fn create_comment(&self, user_id: i64, post_id: i64, body: &str)
    -> anyhow::Result<Comment>;
    async fn list_comments(&self, post_id: i64) -> anyhow::Result<Vec<Comment>>;
}
