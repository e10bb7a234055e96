use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::{self, AppState};
use crate::config::TravelAiConfig;
use crate::providers::ProviderFactory;

/// Build the full application: the travel API under `/api/travel`, with
/// permissive CORS and a cap on request body size.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/travel", api::router(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(cors)
}

pub async fn run(config: &TravelAiConfig) -> crate::Result<()> {
    let state = AppState::new(ProviderFactory::new(config.ai.clone()));
    let app = app(state, config.server.body_limit_bytes());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Viajeros AI server running at http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Viajeros AI server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
