use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::Comment;

pub struct ListComments<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> ListComments<'a, R> {
    pub async fn execute(&self, post_id: i64) -> anyhow::Result<Vec<Comment>> {
        self.repo.list_comments(post_id).await
    }
}
