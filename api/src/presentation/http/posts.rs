use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::posts::create_comment::CreateComment;
use crate::application::use_cases::posts::create_post::CreatePost;
use crate::application::use_cases::posts::get_post::GetPostWithComments;
use crate::application::use_cases::posts::list_comments::ListComments;
use crate::application::use_cases::posts::list_posts::ListPosts;
use crate::bootstrap::app_context::AppContext;
use crate::domain::posts::post as domain;
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::{ApiError, ErrorBody};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserPostIn {
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserPost {
    pub id: i64,
    pub body: String,
    pub user_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentIn {
    pub body: String,
    pub post_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub post_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserPostWithComments {
    pub post: UserPost,
    pub comments: Vec<Comment>,
}

impl From<domain::Post> for UserPost {
    fn from(p: domain::Post) -> Self {
        UserPost {
            id: p.id,
            body: p.body,
            user_id: p.user_id,
        }
    }
}

impl From<domain::Comment> for Comment {
    fn from(c: domain::Comment) -> Self {
        Comment {
            id: c.id,
            body: c.body,
            post_id: c.post_id,
            user_id: c.user_id,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/post", post(create_post).get(list_posts))
        .route("/post/:post_id", get(get_post_with_comments))
        .route("/post/:post_id/comment", get(list_comments))
        .route("/comment", post(create_comment))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/post", tag = "Posts", request_body = UserPostIn, responses(
    (status = 201, body = UserPost),
    (status = 401, body = ErrorBody)
))]
pub async fn create_post(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<UserPostIn>, JsonRejection>,
) -> Result<(StatusCode, Json<UserPost>), ApiError> {
    let Json(req) = payload?;
    let repo = ctx.post_repo();
    let uc = CreatePost {
        repo: repo.as_ref(),
    };
    let post = uc.execute(user.id, &req.body).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[utoipa::path(get, path = "/post", tag = "Posts", security(()), responses(
    (status = 200, body = [UserPost])
))]
pub async fn list_posts(State(ctx): State<AppContext>) -> Result<Json<Vec<UserPost>>, ApiError> {
    let repo = ctx.post_repo();
    let uc = ListPosts {
        repo: repo.as_ref(),
    };
    let posts = uc.execute().await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/comment", tag = "Posts", request_body = CommentIn, responses(
    (status = 201, body = Comment),
    (status = 401, body = ErrorBody),
    (status = 404, body = ErrorBody, description = "Post not found")
))]
pub async fn create_comment(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CommentIn>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let Json(req) = payload?;
    let repo = ctx.post_repo();
    let uc = CreateComment {
        repo: repo.as_ref(),
    };
    let comment = uc.execute(user.id, req.post_id, &req.body).await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

#[utoipa::path(get, path = "/post/{post_id}/comment", tag = "Posts", security(()),
    params(("post_id" = i64, Path, description = "Post id")),
    responses((status = 200, body = [Comment])))]
pub async fn list_comments(
    State(ctx): State<AppContext>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let repo = ctx.post_repo();
    let uc = ListComments {
        repo: repo.as_ref(),
    };
    let comments = uc.execute(post_id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/post/{post_id}", tag = "Posts", security(()),
    params(("post_id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, body = UserPostWithComments),
        (status = 404, body = ErrorBody, description = "Post not found")
    ))]
pub async fn get_post_with_comments(
    State(ctx): State<AppContext>,
    Path(post_id): Path<i64>,
) -> Result<Json<UserPostWithComments>, ApiError> {
    let repo = ctx.post_repo();
    let uc = GetPostWithComments {
        repo: repo.as_ref(),
    };
    let (post, comments) = uc
        .execute(post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;
    Ok(Json(UserPostWithComments {
        post: post.into(),
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}
