use tabled::Table;
use tokio_util::sync::CancellationToken;

use crate::{
    amadeus::{AmadeusClient, ClientError},
    api::SearchRequestDto,
    config::ClientConfig,
    error, info, utils, warning,
};

pub async fn search(query: String, country: Option<String>) {
    let request = SearchRequestDto::new(query);
    if let Err(errors) = request.validate() {
        let messages: Vec<String> = errors.into_values().flatten().collect();
        error!("Invalid search query: {}", messages.join("; "));
    }

    let config = match ClientConfig::from_env() {
        Ok(c) => c,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let client = match AmadeusClient::new(config) {
        Ok(c) => c,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let country = utils::normalize_country_code(country);
    match client
        .search_cities(&request.query, country.as_deref(), &cancel)
        .await
    {
        Ok(response) if response.data.is_empty() => {
            warning!("No cities found for '{}'", request.query)
        }
        Ok(response) => {
            let rows = utils::city_table_rows(&response.data);
            println!("{}", Table::new(rows));
            info!("{} of {} cities shown", response.data.len(), response.meta.count);
        }
        Err(ClientError::UpstreamApi(e)) => error!(
            "Amadeus rejected the search ({} / code {}): {}{}",
            e.http_status_code,
            e.provider_code,
            e.title,
            e.detail.map(|d| format!(" - {d}")).unwrap_or_default()
        ),
        Err(e) => error!("City search failed. Err: {}", e),
    }
}
