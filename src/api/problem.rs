use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::validation::ValidationErrors;
use crate::amadeus::ClientError;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 9457 problem details body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind: type_for(status),
            title: title.into(),
            status: status.as_u16(),
            detail,
            errors: None,
        }
    }

    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            errors: Some(errors),
            ..Self::new(
                StatusCode::BAD_REQUEST,
                "One or more validation errors occurred.",
                None,
            )
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<&ClientError> for Problem {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::UpstreamApi(upstream) => {
                let status = StatusCode::from_u16(upstream.http_status_code)
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                Problem::new(status, upstream.title.clone(), upstream.detail.clone())
            }
            ClientError::InvalidResponse(message) => Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid response",
                Some(message.clone()),
            ),
            ClientError::Cancelled => Problem::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Service Unavailable",
                Some("The request was cancelled before it completed".to_string()),
            ),
            // internals of auth and transport failures stay in the logs
            ClientError::AuthFailure(_) | ClientError::TransportFailure(_) => Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing your request.",
                None,
            ),
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
            Json(self),
        )
            .into_response()
    }
}

fn type_for(status: StatusCode) -> String {
    match status.as_u16() {
        400 => "https://tools.ietf.org/html/rfc9110#section-15.5.1",
        401 => "https://tools.ietf.org/html/rfc9110#section-15.5.2",
        403 => "https://tools.ietf.org/html/rfc9110#section-15.5.4",
        404 => "https://tools.ietf.org/html/rfc9110#section-15.5.5",
        429 => "https://tools.ietf.org/html/rfc6585#section-4",
        500 => "https://tools.ietf.org/html/rfc9110#section-15.6.1",
        502 => "https://tools.ietf.org/html/rfc9110#section-15.6.3",
        503 => "https://tools.ietf.org/html/rfc9110#section-15.6.4",
        _ => "about:blank",
    }
    .to_string()
}
