//! # API Module
//!
//! HTTP endpoints of the city search service, built on
//! [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! - [`search`] - `GET /search?Query=<text>`: validates the query, calls
//!   Amadeus and returns the matching cities as a JSON array
//! - [`health`] - `GET /health`: liveness probe with service name and version
//!
//! ## Error Responses
//!
//! Failures are answered with problem details (`application/problem+json`,
//! see [`Problem`]):
//!
//! - **400** - validation problem listing every failed rule under `errors.Query`
//! - **upstream status** - Amadeus reported an error; its title and detail are
//!   passed through
//! - **500** - the Amadeus response could not be understood, or the token
//!   exchange or network failed (no internal detail is exposed)
//! - **503** - the service is shutting down and the request was cancelled

mod health;
mod problem;
mod search;
mod validation;

pub use health::health;
pub use problem::{PROBLEM_CONTENT_TYPE, Problem};
pub use search::search;
pub use validation::{
    MAX_QUERY_LENGTH, MIN_QUERY_LENGTH, QUERY_FIELD, QUERY_REQUIRED, QUERY_TOO_LONG,
    QUERY_TOO_SHORT, SearchRequestDto, ValidationErrors,
};
