mod common;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::http::StatusCode;
use citysearch::{
    api::{PROBLEM_CONTENT_TYPE, QUERY_REQUIRED, QUERY_TOO_LONG, QUERY_TOO_SHORT},
    server::{self, AppState},
};
use common::{Upstream, client_with_clock};
use serde_json::Value;

/// Serves the real router against a fake Amadeus and returns its base URL.
async fn spawn_service() -> (String, Arc<Upstream>, AppState) {
    let (client, upstream, _clock) = client_with_clock().await;
    let state = AppState::new(client);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = server::router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), upstream, state)
}

async fn get(url: &str) -> (StatusCode, Option<String>, Value) {
    let res = reqwest::get(url).await.unwrap();
    let status = res.status();
    let content_type = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = res.json::<Value>().await.unwrap();
    (status, content_type, body)
}

#[tokio::test]
async fn test_search_returns_city_array() {
    let (base, upstream, _state) = spawn_service().await;

    let (status, _, body) = get(&format!("{base}/search?Query=Lon")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(upstream.last_query().as_deref(), Some("keyword=Lon"));
    let cities = body.as_array().unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0]["type"], "location");
    assert_eq!(cities[0]["subType"], "city");
    assert_eq!(cities[0]["name"], "LONDON");
    assert_eq!(cities[0]["iataCode"], "LON");
    assert_eq!(cities[0]["address"]["countryCode"], "GB");
    assert_eq!(cities[0]["geoCode"]["latitude"], 51.50853);
}

#[tokio::test]
async fn test_lowercase_query_parameter_is_accepted() {
    let (base, _upstream, _state) = spawn_service().await;

    let (status, _, _) = get(&format!("{base}/search?query=Lon")).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_short_query_is_rejected_before_upstream() {
    let (base, upstream, _state) = spawn_service().await;

    let (status, content_type, body) = get(&format!("{base}/search?Query=x")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some(PROBLEM_CONTENT_TYPE));
    assert_eq!(body["status"], 400);
    assert_eq!(body["errors"]["Query"], serde_json::json!([QUERY_TOO_SHORT]));
    assert_eq!(upstream.token_calls(), 0);
    assert_eq!(upstream.search_calls(), 0);
}

#[tokio::test]
async fn test_missing_query_reports_every_rule() {
    let (base, upstream, _state) = spawn_service().await;

    let (status, _, body) = get(&format!("{base}/search")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["Query"],
        serde_json::json!([QUERY_REQUIRED, QUERY_TOO_SHORT])
    );
    assert_eq!(upstream.search_calls(), 0);
}

#[tokio::test]
async fn test_long_query_is_rejected() {
    let (base, _upstream, _state) = spawn_service().await;
    let query = "a".repeat(101);

    let (status, _, body) = get(&format!("{base}/search?Query={query}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["Query"], serde_json::json!([QUERY_TOO_LONG]));
}

#[tokio::test]
async fn test_upstream_error_keeps_status_title_and_detail() {
    let (base, upstream, _state) = spawn_service().await;
    upstream.set_search_reply(StatusCode::BAD_REQUEST, common::BAD_REQUEST_ERROR);

    let (status, content_type, body) = get(&format!("{base}/search?Query=Lon")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some(PROBLEM_CONTENT_TYPE));
    assert_eq!(body["status"], 400);
    assert_eq!(body["title"], "INVALID FORMAT");
    assert_eq!(body["detail"], "invalid query parameter format");
}

#[tokio::test]
async fn test_invalid_upstream_body_is_500() {
    let (base, upstream, _state) = spawn_service().await;
    upstream.set_search_reply(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>");

    let (status, _, body) = get(&format!("{base}/search?Query=Lon")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["title"], "Invalid response");
    assert_eq!(body["detail"], "could not deserialize error response body");
}

#[tokio::test]
async fn test_token_rejection_is_opaque_500_without_search() {
    let (base, upstream, _state) = spawn_service().await;
    upstream.set_token_reply(
        StatusCode::UNAUTHORIZED,
        Some(r#"{"error":"invalid_client","error_description":"Client credentials are invalid"}"#),
    );

    let (status, content_type, body) = get(&format!("{base}/search?Query=Lon")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type.as_deref(), Some(PROBLEM_CONTENT_TYPE));
    assert_eq!(body["status"], 500);
    assert!(body.get("detail").is_none());
    assert!(!body.to_string().contains("invalid_client"));
    assert_eq!(upstream.search_calls(), 0);
}

#[tokio::test]
async fn test_shutdown_cancels_search() {
    let (base, _upstream, state) = spawn_service().await;
    state.shutdown.cancel();

    let (status, _, body) = get(&format!("{base}/search?Query=Lon")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], 503);
}

#[tokio::test]
async fn test_health_reports_service_and_token_state() {
    let (base, _upstream, _state) = spawn_service().await;

    let (status, _, body) = get(&format!("{base}/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "citysearch");
    assert_eq!(body["tokenCached"], false);

    get(&format!("{base}/search?Query=Lon")).await;
    let (_, _, body) = get(&format!("{base}/health")).await;
    assert_eq!(body["tokenCached"], true);
}

#[tokio::test]
async fn test_health_answers_while_token_refresh_is_slow() {
    let (base, upstream, _state) = spawn_service().await;
    upstream.set_token_delay(Duration::from_secs(3));

    let search_url = format!("{base}/search?Query=Lon");
    let search = tokio::spawn(async move { reqwest::get(search_url).await });
    tokio::time::sleep(Duration::from_millis(200)).await;

    let started = Instant::now();
    let (status, _, body) = get(&format!("{base}/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenCached"], false);
    assert!(started.elapsed() < Duration::from_secs(1));
    search.abort();
}
