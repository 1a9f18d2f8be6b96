use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    middleware::Next,
    response::IntoResponse,
    routing::{get, post},
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::api::{self, ApiError};
use crate::config::AppConfig;
use crate::extraction::Extractor;
use crate::llm::{ChatCompletionsDriver, LlmSettings};

/// Room for multipart boundaries and the message field on top of the file.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>, settings: LlmSettings) -> anyhow::Result<()> {
    info!(
        name: "llm.config.loaded",
        base_url = %settings.base_url,
        model = %settings.model,
        provider = ?settings.provider,
        api_key_set = settings.api_key.is_some(),
        "LLM configuration loaded"
    );

    tokio::fs::create_dir_all(&config.uploads.dir).await?;

    let state = AppState {
        llm: Arc::new(ChatCompletionsDriver::new(settings)),
        extractor: Arc::new(Extractor::new(&config.extraction)),
        config: Arc::clone(&config),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        static_dir = %config.server.static_dir,
        "Sancho's Bot server is running"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
///
/// Unknown paths fall through to the static front-end; paths with no file
/// get `index.html` with a 404 status.
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let static_dir = Path::new(&config.server.static_dir);
    let frontend = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    // A disabled timeout is a very long one, so the layer stack keeps one type.
    let timeout_duration = if config.resilience.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60)
    } else {
        Duration::from_secs(config.resilience.request_timeout_secs)
    };

    Router::new()
        .route("/api/chat", post(api::chat_handler))
        .route("/api/health", get(api::health_handler))
        .fallback_service(frontend)
        .layer(DefaultBodyLimit::max(
            config.uploads.max_file_size + MULTIPART_OVERHEAD,
        ))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout_duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => ApiError::Timeout(timeout_duration).into_response(),
                }
            },
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
