use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tokio_util::sync::CancellationToken;

use crate::{amadeus::AmadeusClient, api};

/// State shared by every request handler.
///
/// `shutdown` is the root cancellation token; each request derives a child
/// from it so in-flight upstream calls unwind when the server stops.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<AmadeusClient>,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(client: AmadeusClient) -> Self {
        Self {
            client: Arc::new(client),
            shutdown: CancellationToken::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/search", get(api::search))
        .with_state(state)
}

/// Binds `addr` and serves the API until `state.shutdown` is cancelled.
///
/// # Errors
///
/// Returns the I/O error if the address cannot be bound or the server fails.
pub async fn start_api_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    let shutdown = state.shutdown.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
