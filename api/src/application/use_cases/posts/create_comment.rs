use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::Comment;

#[derive(thiserror::Error, Debug)]
pub enum CreateCommentError {
    #[error("Post not found")]
    PostNotFound,
    #[error("failed to persist comment")]
    Repository(#[source] anyhow::Error),
}

pub struct CreateComment<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> CreateComment<'a, R> {
    pub async fn execute(
        &self,
        user_id: i64,
        post_id: i64,
        body: &str,
    ) -> Result<Comment, CreateCommentError> {
        self.repo
            .find_post(post_id)
            .await
            .map_err(CreateCommentError::Repository)?
            .ok_or(CreateCommentError::PostNotFound)?;
        let comment = self
            .repo
            .create_comment(user_id, post_id, body)
            .await
            .map_err(CreateCommentError::Repository)?;
        tracing::debug!(comment_id = comment.id, post_id, user_id, "comment_created");
        Ok(comment)
    }
}
