use reqwest::Client;

use crate::{amadeus::ClientError, config::ClientConfig, types::TokenResponse};

pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";

/// Performs an OAuth 2.0 client-credentials exchange against Amadeus.
///
/// Posts the configured API key and secret as a form to the token endpoint
/// and parses `{access_token, expires_in}` from the reply.
///
/// # Arguments
///
/// * `client` - HTTP client used for the exchange, carrying the request timeout
/// * `config` - Base URL and credentials
///
/// # Errors
///
/// Every failure is reported as [`ClientError::AuthFailure`]: a transport error
/// or timeout, a non-2xx status from the token endpoint, or a body that is not
/// a token payload.
pub async fn request_client_credentials_token(
    client: &Client,
    config: &ClientConfig,
) -> Result<TokenResponse, ClientError> {
    let res = client
        .post(config.endpoint(TOKEN_PATH))
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", config.api_key.as_str()),
            ("client_secret", config.api_secret.as_str()),
        ])
        .send()
        .await
        .map_err(|e| ClientError::AuthFailure(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
        return Err(ClientError::AuthFailure(format!(
            "token endpoint returned {status}"
        )));
    }

    let body = res
        .bytes()
        .await
        .map_err(|e| ClientError::AuthFailure(e.to_string()))?;

    serde_json::from_slice::<TokenResponse>(&body)
        .map_err(|e| ClientError::AuthFailure(format!("malformed token response: {e}")))
}
