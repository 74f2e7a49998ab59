use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use storeapi::bootstrap::app_context::{AppContext, AppServices};
use storeapi::bootstrap::config::Config;
use storeapi::bootstrap::logging::{LoggingConfig, init_logging};
use storeapi::infrastructure::db::repositories::post_repository_sqlx::SqlxPostRepository;
use storeapi::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

#[derive(OpenApi)]
#[openapi(
        paths(
            storeapi::presentation::http::auth::register,
            storeapi::presentation::http::auth::login,
            storeapi::presentation::http::posts::create_post,
            storeapi::presentation::http::posts::list_posts,
            storeapi::presentation::http::posts::create_comment,
            storeapi::presentation::http::posts::list_comments,
            storeapi::presentation::http::posts::get_post_with_comments,
            storeapi::presentation::http::health::health,
        ),
        components(schemas(
            storeapi::presentation::http::auth::UserIn,
            storeapi::presentation::http::auth::DetailResponse,
            storeapi::presentation::http::auth::TokenForm,
            storeapi::presentation::http::auth::TokenResponse,
            storeapi::presentation::http::error::ErrorBody,
            storeapi::presentation::http::posts::UserPostIn,
            storeapi::presentation::http::posts::UserPost,
            storeapi::presentation::http::posts::CommentIn,
            storeapi::presentation::http::posts::Comment,
            storeapi::presentation::http::posts::UserPostWithComments,
            storeapi::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Registration and token issuance"),
            (name = "Posts", description = "Posts and comments"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = Config::from_env()?;
    init_logging(&LoggingConfig::from_config(&cfg))?;
    info!(env_state = ?cfg.env_state, port = cfg.api_port, "Starting storeapi");

    let pool = storeapi::infrastructure::db::connect_pool(&cfg.database_url).await?;
    storeapi::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::new(
        Arc::new(SqlxUserRepository::new(pool.clone())),
        Arc::new(SqlxPostRepository::new(pool.clone())),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = storeapi::presentation::http::router(ctx)
        .merge(storeapi::presentation::http::health::routes(pool))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()));

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
}
