use tokio_util::sync::CancellationToken;

use super::{AmadeusClient, ClientError, response};
use crate::types::{SearchCitiesRequest, SearchCitiesResponse};

pub const CITY_SEARCH_PATH: &str = "/v1/reference-data/locations/cities";

impl AmadeusClient {
    /// Searches Amadeus for cities matching a keyword.
    ///
    /// Makes sure a fresh bearer token is cached (refreshing it if it has
    /// expired), then issues `GET /v1/reference-data/locations/cities` with
    /// `keyword` and, when given and non-empty, `countryCode`.
    ///
    /// # Arguments
    ///
    /// * `keyword` - Search text; callers validate it is non-empty
    /// * `country_code` - Optional ISO 3166 alpha-2 code restricting the search
    /// * `cancel` - Aborts the token refresh or the search when triggered
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthFailure`] if a token refresh was needed and failed;
    ///   no search request is sent in that case
    /// - [`ClientError::TransportFailure`] on network errors or timeouts
    /// - [`ClientError::InvalidResponse`] / [`ClientError::UpstreamApi`] as
    ///   classified by [`response::interpret`]
    /// - [`ClientError::Cancelled`] if `cancel` fires before completion
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cancel = CancellationToken::new();
    /// let cities = client.search_cities("Lon", None, &cancel).await?;
    /// println!("{} matches", cities.meta.count);
    /// ```
    pub async fn search_cities(
        &self,
        keyword: &str,
        country_code: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<SearchCitiesResponse, ClientError> {
        let request = SearchCitiesRequest::new(keyword, country_code.map(str::to_string));

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.send_search(&request) => result,
        }
    }

    async fn send_search(
        &self,
        request: &SearchCitiesRequest,
    ) -> Result<SearchCitiesResponse, ClientError> {
        let authorization = self.tokens.get_valid_token().await?;

        let res = self
            .http
            .get(self.config.endpoint(CITY_SEARCH_PATH))
            .query(&request.query_pairs())
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ClientError::TransportFailure)?;

        let result = response::read_response::<SearchCitiesResponse>(res).await;
        if let Err(e) = &result {
            tracing::warn!(keyword = %request.keyword, error = %e, "city search failed");
        }
        result
    }
}
