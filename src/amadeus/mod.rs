//! # Amadeus Integration Module
//!
//! This module is the integration layer between the service and the Amadeus
//! Self-Service REST API. It owns request construction, OAuth 2.0 token
//! exchange, and the translation of upstream responses into typed results.
//!
//! ## Architecture
//!
//! ```text
//! Search Endpoint / CLI
//!          ↓
//! AmadeusClient::search_cities ──→ TokenManager (cached bearer token)
//!          ↓                              ↓
//!   GET /v1/reference-data/...     POST /v1/security/oauth2/token
//!          ↓
//! response::interpret ──→ SearchCitiesResponse | ClientError
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Client-credentials token exchange (`grant_type=client_credentials`)
//! - [`cities`] - City search against `/v1/reference-data/locations/cities`
//! - [`response`] - Classifies raw HTTP responses as payloads or failures
//! - [`error`] - The [`ClientError`] taxonomy and [`UpstreamError`]
//!
//! ## Authentication Strategy
//!
//! Amadeus issues short-lived bearer tokens (about 30 minutes). The token is
//! cached in the [`crate::management::TokenManager`] and refreshed lazily by
//! the first request issued at or after its expiry. There is no background
//! refresh loop.
//!
//! ## Error Handling Philosophy
//!
//! Nothing is retried. A call either returns a complete response or exactly
//! one [`ClientError`]:
//!
//! - **AuthFailure** - the token exchange failed (transport, non-2xx, bad payload)
//! - **TransportFailure** - network failure or timeout on the API call itself
//! - **InvalidResponse** - a body that does not match the expected contract,
//!   on either the success or the error path
//! - **UpstreamApi** - Amadeus reported a structured error
//! - **Cancelled** - the caller's cancellation token fired first
//!
//! ## Cancellation
//!
//! Every public call takes a [`tokio_util::sync::CancellationToken`]. Token
//! refresh, request and body read are raced against it as a single unit.

pub mod auth;
pub mod cities;
mod client;
pub mod error;
pub mod response;

pub use client::AmadeusClient;
pub use error::{ClientError, UpstreamError};
