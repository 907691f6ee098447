#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Router,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use citysearch::{amadeus::AmadeusClient, config::ClientConfig};
use mockable::Clock;

pub const LONDON_RESPONSE: &str = r#"{
  "meta": {
    "count": 1,
    "links": {
      "self": "https://test.api.amadeus.com/v1/reference-data/locations/cities?keyword=Lon"
    }
  },
  "data": [
    {
      "type": "location",
      "subType": "city",
      "name": "LONDON",
      "iataCode": "LON",
      "address": { "countryCode": "GB", "stateCode": "ENG" },
      "geoCode": { "latitude": 51.50853, "longitude": -0.12574 }
    }
  ],
  "included": {
    "airports": {
      "LHR": { "name": "HEATHROW", "iataCode": "LHR", "subType": "AIRPORT" }
    }
  }
}"#;

pub const BAD_REQUEST_ERROR: &str = r#"{
  "errors": [
    {
      "status": 400,
      "code": 477,
      "title": "INVALID FORMAT",
      "detail": "invalid query parameter format",
      "source": { "parameter": "countryCode" }
    }
  ]
}"#;

/// Reply the fake token endpoint sends. `None` body means a generated
/// `{access_token: "token-<n>", expires_in}` payload.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Option<String>,
}

pub struct Upstream {
    pub token_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub expires_in: Mutex<u32>,
    pub token_reply: Mutex<Reply>,
    pub token_delay: Mutex<Duration>,
    pub search_reply: Mutex<Reply>,
    pub search_delay: Mutex<Duration>,
    pub last_query: Mutex<Option<String>>,
    pub last_authorization: Mutex<Option<String>>,
    pub last_token_form: Mutex<Option<String>>,
}

impl Upstream {
    fn new() -> Self {
        Self {
            token_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            expires_in: Mutex::new(1799),
            token_reply: Mutex::new(Reply {
                status: StatusCode::OK,
                body: None,
            }),
            token_delay: Mutex::new(Duration::ZERO),
            search_reply: Mutex::new(Reply {
                status: StatusCode::OK,
                body: Some(LONDON_RESPONSE.to_string()),
            }),
            search_delay: Mutex::new(Duration::ZERO),
            last_query: Mutex::new(None),
            last_authorization: Mutex::new(None),
            last_token_form: Mutex::new(None),
        }
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn set_expires_in(&self, seconds: u32) {
        *self.expires_in.lock().unwrap() = seconds;
    }

    pub fn set_token_reply(&self, status: StatusCode, body: Option<&str>) {
        *self.token_reply.lock().unwrap() = Reply {
            status,
            body: body.map(str::to_string),
        };
    }

    pub fn set_token_delay(&self, delay: Duration) {
        *self.token_delay.lock().unwrap() = delay;
    }

    pub fn set_search_reply(&self, status: StatusCode, body: &str) {
        *self.search_reply.lock().unwrap() = Reply {
            status,
            body: Some(body.to_string()),
        };
    }

    pub fn set_search_delay(&self, delay: Duration) {
        *self.search_delay.lock().unwrap() = delay;
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().unwrap().clone()
    }

    pub fn last_token_form(&self) -> Option<String> {
        self.last_token_form.lock().unwrap().clone()
    }
}

async fn token(State(upstream): State<Arc<Upstream>>, body: String) -> impl IntoResponse {
    let n = upstream.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
    *upstream.last_token_form.lock().unwrap() = Some(body);

    let delay = *upstream.token_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let reply = upstream.token_reply.lock().unwrap().clone();
    let expires_in = *upstream.expires_in.lock().unwrap();
    let body = reply.body.unwrap_or_else(|| {
        format!(
            r#"{{"type":"amadeusOAuth2Token","access_token":"token-{n}","token_type":"Bearer","expires_in":{expires_in},"state":"approved"}}"#
        )
    });
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

async fn cities(
    State(upstream): State<Arc<Upstream>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> impl IntoResponse {
    upstream.search_calls.fetch_add(1, Ordering::SeqCst);
    *upstream.last_query.lock().unwrap() = query;
    *upstream.last_authorization.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let delay = *upstream.search_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let reply = upstream.search_reply.lock().unwrap().clone();
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body.unwrap_or_default(),
    )
}

/// Starts a fake Amadeus API on an ephemeral port and returns its base URL.
pub async fn spawn_upstream() -> (String, Arc<Upstream>) {
    let upstream = Arc::new(Upstream::new());
    let app = Router::new()
        .route("/v1/security/oauth2/token", post(token))
        .route("/v1/reference-data/locations/cities", get(cities))
        .with_state(Arc::clone(&upstream));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), upstream)
}

pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.0.lock().unwrap() += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url, "test-key", "test-secret")
}

/// Fake upstream plus a client pointed at it, driven by a mutable clock.
pub async fn client_with_clock() -> (AmadeusClient, Arc<Upstream>, Arc<MutableClock>) {
    let (base_url, upstream) = spawn_upstream().await;
    let clock = Arc::new(MutableClock::new(start_time()));
    let client = AmadeusClient::with_clock(test_config(&base_url), clock.clone()).unwrap();
    (client, upstream, clock)
}
