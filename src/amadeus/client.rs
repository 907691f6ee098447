use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use reqwest::Client;

use crate::{config::ClientConfig, management::TokenManager};

/// Client for the Amadeus Self-Service REST API.
///
/// Owns one connection pool shared by the token exchange and the API calls,
/// and the process-wide [`TokenManager`]. Cheap to share behind an `Arc`.
pub struct AmadeusClient {
    pub(crate) http: Client,
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) tokens: TokenManager,
}

impl AmadeusClient {
    /// Builds a client that reads time from the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        Self::with_clock(config, Arc::new(DefaultClock))
    }

    /// Builds a client with an explicit time source for token expiry.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_clock(
        config: ClientConfig,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let config = Arc::new(config);
        let tokens = TokenManager::new(http.clone(), Arc::clone(&config), clock);

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }
}
