use thiserror::Error;

/// A failure the upstream explicitly reported through its `{errors: [...]}`
/// envelope. `http_status_code` is taken from the transport response, not
/// from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    pub http_status_code: u16,
    pub provider_code: i64,
    pub title: String,
    pub detail: Option<String>,
}

/// Every way a call into the Amadeus API can fail.
///
/// None of these are recovered inside the client. Each call either returns a
/// complete response or exactly one of these.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("token exchange failed: {0}")]
    AuthFailure(String),

    #[error("transport failure: {0}")]
    TransportFailure(#[source] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("upstream API error {}: {}", .0.http_status_code, .0.title)]
    UpstreamApi(UpstreamError),

    #[error("request was cancelled")]
    Cancelled,
}

impl ClientError {
    pub fn upstream(&self) -> Option<&UpstreamError> {
        match self {
            ClientError::UpstreamApi(e) => Some(e),
            _ => None,
        }
    }
}
