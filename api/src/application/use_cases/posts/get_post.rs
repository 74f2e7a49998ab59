use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::{Comment, Post};

pub struct GetPostWithComments<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> GetPostWithComments<'a, R> {
    pub async fn execute(&self, post_id: i64) -> anyhow::Result<Option<(Post, Vec<Comment>)>> {
        let Some(post) = self.repo.find_post(post_id).await? else {
            return Ok(None);
        };
        let comments = self.repo.list_comments(post.id).await?;
        Ok(Some((post, comments)))
    }
}
