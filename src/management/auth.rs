use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;
use reqwest::Client;
use tokio::sync::{Mutex, watch};

use crate::{
    amadeus::{ClientError, auth},
    config::ClientConfig,
    types::AccessToken,
};

/// Process-wide cache for the Amadeus bearer token.
///
/// The token is refreshed lazily: the first call after expiry performs a
/// client-credentials exchange and every call before it is served from the
/// cache without touching the network.
///
/// # Concurrency
///
/// The cached [`AccessToken`] sits behind a single async mutex that stays held
/// for the whole check-and-refresh, so concurrent callers that all see an
/// expired token wait for one exchange instead of issuing their own. The
/// token and its expiry are swapped in one assignment.
///
/// Every stored token is also published to a `watch` channel, so
/// [`TokenManager::current_token`] reads the latest snapshot without waiting
/// on a refresh that is still in flight.
///
/// # Expiry
///
/// `expires_at` is the instant the token response was received plus
/// `expires_in`. A token counts as fresh while `now + margin < expires_at`;
/// the margin defaults to zero.
pub struct TokenManager {
    client: Client,
    config: Arc<ClientConfig>,
    clock: Arc<dyn Clock + Send + Sync>,
    token: Mutex<Option<AccessToken>>,
    published: watch::Sender<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(
        client: Client,
        config: Arc<ClientConfig>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        TokenManager {
            client,
            config,
            clock,
            token: Mutex::new(None),
            published: watch::Sender::new(None),
        }
    }

    /// Returns an `Authorization` header value backed by a token that has not
    /// expired, refreshing it first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailure`] when a refresh is required and the
    /// exchange fails. The previously cached token is left untouched.
    pub async fn get_valid_token(&self) -> Result<String, ClientError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if !self.is_expired(token) {
                tracing::debug!(expires_at = %token.expires_at, "using cached access token");
                return Ok(token.authorization_header());
            }
        }

        let fresh = self.refresh_token().await?;
        let header = fresh.authorization_header();
        self.published.send_replace(Some(fresh.clone()));
        *cached = Some(fresh);
        Ok(header)
    }

    /// Snapshot of the cached token, if one has been obtained.
    ///
    /// Never blocks, even while a refresh holds the cache lock.
    pub fn current_token(&self) -> Option<AccessToken> {
        self.published.borrow().clone()
    }

    fn is_expired(&self, token: &AccessToken) -> bool {
        let horizon = TimeDelta::from_std(self.config.token_expiry_margin)
            .ok()
            .and_then(|margin| self.clock.utc().checked_add_signed(margin));
        // a horizon past the representable range can never be fresh
        horizon.is_none_or(|at| !token.is_valid_at(at))
    }

    async fn refresh_token(&self) -> Result<AccessToken, ClientError> {
        tracing::debug!("requesting new Amadeus access token");
        let response = auth::request_client_credentials_token(&self.client, &self.config).await?;

        let expires_at = self.clock.utc() + TimeDelta::seconds(i64::from(response.expires_in));
        tracing::info!(%expires_at, "refreshed Amadeus access token");

        Ok(AccessToken {
            token: response.access_token,
            expires_at,
        })
    }
}
