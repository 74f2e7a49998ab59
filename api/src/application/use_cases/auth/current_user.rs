use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct GetCurrentUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetCurrentUser<'a, R> {
    pub async fn execute(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = self.repo.find_by_email(email).await?;
        Ok(row.map(|r| User {
            id: r.id,
            email: r.email,
        }))
    }
}
