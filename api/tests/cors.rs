mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{send, test_app_with};
use storeapi::bootstrap::config::{Config, EnvState};

fn cross_origin_get() -> Request<Body> {
    Request::builder()
        .uri("/post")
        .header(header::ORIGIN, "https://elsewhere.example")
        .body(Body::empty())
        .unwrap()
}

fn config(env_state: EnvState, frontend_url: Option<&str>) -> Config {
    let mut cfg = Config::for_tests();
    cfg.env_state = env_state;
    cfg.frontend_url = frontend_url.map(str::to_string);
    cfg
}

#[tokio::test]
async fn prod_without_frontend_allows_no_origin() {
    let app = test_app_with(config(EnvState::Prod, None));
    let resp = send(&app, cross_origin_get()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        !resp
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn configured_frontend_is_the_only_allowed_origin() {
    let app = test_app_with(config(EnvState::Prod, Some("https://app.example")));
    let resp = send(&app, cross_origin_get()).await;
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://app.example"
    );
}

#[tokio::test]
async fn dev_mirrors_the_request_origin() {
    let app = test_app_with(config(EnvState::Dev, None));
    let resp = send(&app, cross_origin_get()).await;
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://elsewhere.example"
    );
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}
