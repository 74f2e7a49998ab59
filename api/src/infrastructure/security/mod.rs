use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::bootstrap::config::Config;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: usize,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("Token is missing 'sub' field")]
    MissingSubject,
}

pub fn create_access_token(cfg: &Config, email: &str) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: Some(email.to_string()),
        exp: (now + cfg.access_token_expire_secs.max(0)) as usize,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )?;
    tracing::debug!(email = %email, "access_token_created");
    Ok(token)
}

/// Decodes a bearer token and returns its subject (the user's email).
pub fn decode_access_token(cfg: &Config, token: &str) -> Result<String, TokenError> {
    let mut validation = Validation::default();
    validation.leeway = 0;
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;
    data.claims.sub.ok_or(TokenError::MissingSubject)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(cfg: &Config, claims: &Claims) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_decodes_to_email() {
        let cfg = Config::for_tests();
        let token = create_access_token(&cfg, "alice@example.com").unwrap();
        assert_eq!(
            decode_access_token(&cfg, &token).unwrap(),
            "alice@example.com"
        );
    }

    #[test]
    fn expired_token_is_reported() {
        let cfg = Config::for_tests();
        let past = (chrono::Utc::now().timestamp() - 60) as usize;
        let token = sign(
            &cfg,
            &Claims {
                sub: Some("alice@example.com".into()),
                exp: past,
            },
        );
        assert_eq!(decode_access_token(&cfg, &token), Err(TokenError::Expired));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let cfg = Config::for_tests();
        let mut other = Config::for_tests();
        other.jwt_secret = "another-secret-abcdefgh".into();
        let token = create_access_token(&other, "alice@example.com").unwrap();
        assert_eq!(decode_access_token(&cfg, &token), Err(TokenError::Invalid));
        assert_eq!(
            decode_access_token(&cfg, "not-a-jwt"),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn token_without_subject_is_rejected() {
        let cfg = Config::for_tests();
        let future = (chrono::Utc::now().timestamp() + 60) as usize;
        let token = sign(
            &cfg,
            &Claims {
                sub: None,
                exp: future,
            },
        );
        assert_eq!(
            decode_access_token(&cfg, &token),
            Err(TokenError::MissingSubject)
        );
    }
}
