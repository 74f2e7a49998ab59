use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::auth::register::RegisterError;
use crate::application::use_cases::posts::create_comment::CreateCommentError;
use crate::infrastructure::security::TokenError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

/// Every failure a handler can report. Rendered as `{"detail": "..."}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{1}")]
    Rejected(StatusCode, String),
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rejected(status, _) => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        ApiError::Rejected(StatusCode::UNPROCESSABLE_ENTITY, detail.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!(error = ?err, "request_failed");
        }
        let status = self.status();
        let unauthorized = matches!(self, ApiError::Unauthorized(_));
        let mut resp = (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response();
        if unauthorized {
            resp.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        resp
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::AlreadyExists => ApiError::BadRequest(err.to_string()),
            RegisterError::Hash(e) | RegisterError::Repository(e) => ApiError::Internal(e),
        }
    }
}

impl From<CreateCommentError> for ApiError {
    fn from(err: CreateCommentError) -> Self {
        match err {
            CreateCommentError::PostNotFound => ApiError::NotFound(err.to_string()),
            CreateCommentError::Repository(e) => ApiError::Internal(e),
        }
    }
}

// Any body that cannot be read as the expected payload is unprocessable,
// including a missing or wrong content type.
impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        ApiError::unprocessable(r.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(r: FormRejection) -> Self {
        ApiError::unprocessable(r.body_text())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}
