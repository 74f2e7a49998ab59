use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::Post;

pub struct CreatePost<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> CreatePost<'a, R> {
    pub async fn execute(&self, user_id: i64, body: &str) -> anyhow::Result<Post> {
        let post = self.repo.create_post(user_id, body).await?;
        tracing::debug!(post_id = post.id, user_id, "post_created");
        Ok(post)
    }
}
