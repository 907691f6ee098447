use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use super::{Problem, SearchRequestDto};
use crate::{amadeus::ClientError, server::AppState};

/// `GET /search?Query=<text>`
///
/// Validates the query, forwards it to Amadeus and answers with the matched
/// cities as a JSON array. Validation failures become a 400 validation
/// problem before any upstream call; client failures are mapped through
/// [`Problem::from`].
pub async fn search(
    State(state): State<AppState>,
    Query(request): Query<SearchRequestDto>,
) -> Response {
    if let Err(errors) = request.validate() {
        return Problem::validation(errors).into_response();
    }

    let cancel = state.shutdown.child_token();
    match state
        .client
        .search_cities(&request.query, None, &cancel)
        .await
    {
        Ok(response) => Json(response.data).into_response(),
        Err(e) => {
            match &e {
                ClientError::AuthFailure(_) | ClientError::TransportFailure(_) => {
                    tracing::error!(error = %e, "city search could not reach Amadeus")
                }
                _ => tracing::warn!(error = %e, "city search failed"),
            }
            Problem::from(&e).into_response()
        }
    }
}
