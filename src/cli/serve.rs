use std::net::SocketAddr;

use crate::{
    amadeus::AmadeusClient,
    config::{self, ClientConfig},
    error, info,
    server::{self, AppState},
    success,
};

pub async fn serve(addr: Option<SocketAddr>) {
    let addr = match addr.map_or_else(config::server_addr, Ok) {
        Ok(a) => a,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let config = match ClientConfig::from_env() {
        Ok(c) => c,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    info!("Forwarding searches to {}", config.base_url);

    let client = match AmadeusClient::new(config) {
        Ok(c) => c,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };

    let state = AppState::new(client);
    let shutdown = state.shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down...");
            shutdown.cancel();
        }
    });

    info!("Listening on http://{}", addr);
    if let Err(e) = server::start_api_server(addr, state).await {
        error!("Server stopped unexpectedly. Err: {}", e);
    }
    success!("Server stopped");
}
