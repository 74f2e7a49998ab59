use axum::{
    Form, Json, Router,
    extract::{FromRequestParts, State, rejection::FormRejection, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    routing::post,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::auth::current_user::GetCurrentUser;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use crate::infrastructure::security::{create_access_token, decode_access_token};
use crate::presentation::http::error::{ApiError, ErrorBody};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserIn {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DetailResponse {
    pub detail: String,
}

/// OAuth2 password grant form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(login))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/register", tag = "Auth", request_body = UserIn, security(()), responses(
    (status = 201, body = DetailResponse),
    (status = 400, body = ErrorBody, description = "Email already registered")
))]
pub async fn register(
    State(ctx): State<AppContext>,
    payload: Result<Json<UserIn>, JsonRejection>,
) -> Result<(StatusCode, Json<DetailResponse>), ApiError> {
    let Json(req) = payload?;
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        email: req.email,
        password: req.password,
    };
    let user = uc.execute(&dto).await.inspect_err(|e| {
        tracing::info!(email = %dto.email, reason = %e, "registration_rejected");
    })?;
    tracing::debug!(email = %user.email, user_id = user.id, "user_registered");
    Ok((
        StatusCode::CREATED,
        Json(DetailResponse {
            detail: "User created.".into(),
        }),
    ))
}

#[utoipa::path(post, path = "/token", tag = "Auth",
    request_body(content = TokenForm, content_type = "application/x-www-form-urlencoded"),
    security(()),
    responses(
        (status = 200, body = TokenResponse),
        (status = 401, body = ErrorBody, description = "Invalid email or password")
    ))]
pub async fn login(
    State(ctx): State<AppContext>,
    form: Result<Form<TokenForm>, FormRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Form(form) = form?;
    if let Some(grant) = form.grant_type.as_deref() {
        if grant != "password" {
            return Err(ApiError::unprocessable("grant_type must be 'password'"));
        }
    }
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: form.username,
        password: form.password,
    };
    let Some(user) = uc.execute(&dto).await? else {
        tracing::info!(email = %dto.email, "login_failed");
        return Err(ApiError::Unauthorized("Invalid email or password".into()));
    };
    let access_token = create_access_token(&ctx.cfg, &user.email)?;
    tracing::debug!(email = %user.email, "login_succeeded");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".into(),
    }))
}

// --- Bearer extractor & current user ---

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| {
                let (scheme, token) = auth.split_once(' ')?;
                scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
            })
            .filter(|t| !t.is_empty());
        match token {
            Some(t) => Ok(Bearer(t.to_string())),
            None => Err(ApiError::Unauthorized("Not authenticated".into())),
        }
    }
}

/// The user owning the request's bearer token.
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let Bearer(token) = Bearer::from_request_parts(parts, ctx).await?;
        let email = decode_access_token(&ctx.cfg, &token)?;
        let repo = ctx.user_repo();
        let uc = GetCurrentUser {
            repo: repo.as_ref(),
        };
        let user = uc
            .execute(&email)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Could not find user for this token".into()))?;
        Ok(CurrentUser(user))
    }
}
