use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::error::{ClientError, UpstreamError};
use crate::types::ErrorResponse;

pub const INVALID_BODY: &str = "could not deserialize response body";
pub const INVALID_ERROR_BODY: &str = "could not deserialize error response body";

/// Reads the body of an upstream response and classifies it.
///
/// A failure while reading the body is a transport failure; everything after
/// that is decided by [`interpret`].
pub async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(ClientError::TransportFailure)?;
    interpret(status, &body)
}

/// Classifies a raw upstream response as a typed payload or a typed failure.
///
/// # Arguments
///
/// * `status` - HTTP status of the transport response
/// * `body` - Raw response body
///
/// # Returns
///
/// - `Ok(T)` when the status is 2xx and the body matches `T`
/// - `Err(ClientError::InvalidResponse)` when either the payload or the error
///   envelope cannot be deserialized, or the envelope holds no error
/// - `Err(ClientError::UpstreamApi)` built from the first error in the
///   envelope, carrying `status` rather than the status inside the payload
pub fn interpret<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ClientError> {
    if status.is_success() {
        return serde_json::from_slice(body)
            .map_err(|_| ClientError::InvalidResponse(INVALID_BODY.to_string()));
    }

    let first = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|envelope| envelope.errors.into_iter().next())
        .ok_or_else(|| ClientError::InvalidResponse(INVALID_ERROR_BODY.to_string()))?;

    Err(ClientError::UpstreamApi(UpstreamError {
        http_status_code: status.as_u16(),
        provider_code: first.code,
        title: first.title,
        detail: first.detail,
    }))
}
