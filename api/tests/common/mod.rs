#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use storeapi::application::ports::post_repository::PostRepository;
use storeapi::application::ports::user_repository::{UserRepository, UserRow};
use storeapi::bootstrap::app_context::{AppContext, AppServices};
use storeapi::bootstrap::config::Config;
use storeapi::domain::posts::post::{Comment, Post};

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<UserRow>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<UserRow>> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.email == email) {
            return Ok(None);
        }
        let row = UserRow {
            id: rows.len() as i64 + 1,
            email: email.to_string(),
            password_hash: Some(password_hash.to_string()),
        };
        rows.push(row.clone());
        Ok(Some(row))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.email == email)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPosts {
    posts: Mutex<Vec<Post>>,
    comments: Mutex<Vec<Comment>>,
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn create_post(&self, user_id: i64, body: &str) -> anyhow::Result<Post> {
        let mut posts = self.posts.lock().unwrap();
        let post = Post {
            id: posts.len() as i64 + 1,
            body: body.to_string(),
            user_id,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> anyhow::Result<Vec<Post>> {
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn find_post(&self, id: i64) -> anyhow::Result<Option<Post>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create_comment(
        &self,
        user_id: i64,
        post_id: i64,
        body: &str,
    ) -> anyhow::Result<Comment> {
        let mut comments = self.comments.lock().unwrap();
        let comment = Comment {
            id: comments.len() as i64 + 1,
            body: body.to_string(),
            post_id,
            user_id,
        };
        comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, post_id: i64) -> anyhow::Result<Vec<Comment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}

pub fn test_app() -> Router {
    test_app_with(Config::for_tests())
}

pub fn test_app_with(cfg: Config) -> Router {
    let services = AppServices::new(
        Arc::new(InMemoryUsers::default()),
        Arc::new(InMemoryPosts::default()),
    );
    storeapi::presentation::http::router(AppContext::new(cfg, services))
}

pub fn json_request(method: &str, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn form_request(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn register(app: &Router, email: &str, password: &str) -> StatusCode {
    let body = serde_json::json!({ "email": email, "password": password });
    send(app, json_request("POST", "/register", &body, None))
        .await
        .status()
}

pub async fn login(app: &Router, email: &str, password: &str) -> Response<Body> {
    let form = format!("username={email}&password={password}");
    send(app, form_request("/token", &form)).await
}

pub async fn token_for(app: &Router, email: &str, password: &str) -> String {
    assert_eq!(register(app, email, password).await, StatusCode::CREATED);
    let resp = login(app, email, password).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}
