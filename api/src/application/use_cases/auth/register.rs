use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::{UserRepository, UserRow};

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("A user with that email already exists")]
    AlreadyExists,
    #[error("failed to hash password")]
    Hash(#[source] anyhow::Error),
    #[error("failed to persist user")]
    Repository(#[source] anyhow::Error),
}

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<UserRow, RegisterError> {
        if self
            .repo
            .find_by_email(&req.email)
            .await
            .map_err(RegisterError::Repository)?
            .is_some()
        {
            return Err(RegisterError::AlreadyExists);
        }
        let hash = hash_password(&req.password).map_err(RegisterError::Hash)?;
        // A concurrent registration can still win between the lookup and the insert.
        self.repo
            .create_user(&req.email, &hash)
            .await
            .map_err(RegisterError::Repository)?
            .ok_or(RegisterError::AlreadyExists)
    }
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}
