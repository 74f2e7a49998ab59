pub mod auth;
pub mod error;
pub mod health;
pub mod posts;

use axum::Router;
use axum::extract::MatchedPath;
use axum::http::{HeaderName, HeaderValue, Method, Request, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::{Config, EnvState};
use crate::infrastructure::logging::MakeCorrelationId;
use crate::infrastructure::logging::correlation::correlation_id_of;

const X_REQUEST_ID: &str = "x-request-id";

/// Application routes wrapped in the request-id, tracing and CORS middleware.
pub fn router(ctx: AppContext) -> Router {
    let cors = cors_layer(&ctx.cfg);

    Router::new()
        .merge(auth::routes(ctx.clone()))
        .merge(posts::routes(ctx))
        .layer(cors)
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            X_REQUEST_ID,
        )))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    let matched = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|p| p.as_str().to_string())
                        .unwrap_or_default();
                    let correlation_id = correlation_id_of(req);
                    tracing::info_span!(
                        "http",
                        %method,
                        %uri,
                        matched_path = %matched,
                        correlation_id = %correlation_id
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(X_REQUEST_ID),
            MakeCorrelationId,
        ))
}

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([HeaderName::from_static(X_REQUEST_ID)]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // Without a configured origin, production allows no cross-origin calls.
        _ if cfg.env_state == EnvState::Prod => base,
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}
