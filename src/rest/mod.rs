use std::net::SocketAddr;

use anyhow::Context as _;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::query::StatesResolver;
use crate::storage::Storage;

mod handlers;
mod models;

use handlers::{graphql, health, not_found};

#[derive(Clone)]
pub struct AppState<S: Storage> {
    pub resolver: StatesResolver<S>,
    pub started_at: std::time::SystemTime,
}

pub async fn serve<S: Storage + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    storage: S,
    cors_origin: &str,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 GraphQL endpoint on http://{}/graphql", addr);

    let state = AppState {
        resolver: StatesResolver::new(storage),
        started_at: std::time::SystemTime::now(),
    };

    let app = app_router(state).layer(cors_layer(cors_origin)?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 API shutdown requested");
        })
        .await?;
    log::info!("👋 API server exited");
    Ok(())
}

pub(crate) fn app_router<S: Storage + Clone + Send + Sync + 'static>(
    state: AppState<S>,
) -> Router {
    Router::new()
        .route("/graphql", post(graphql::<S>))
        .route("/health", get(health::<S>))
        .fallback(not_found)
        .with_state(state)
}

/// Browser access policy: a single allowed origin with credentials, as the
/// bundled frontend expects.
fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("invalid CORS origin {origin:?}"))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}
