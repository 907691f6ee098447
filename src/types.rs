use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Bearer token issued by the Amadeus OAuth2 endpoint together with the
/// instant it stops being usable.
///
/// The pair is replaced as a whole on every refresh, never mutated field by
/// field, so a reader can never observe a token next to another token's expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_valid_at(&self, instant: DateTime<Utc>) -> bool {
        instant < self.expires_at
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Payload of `POST /v1/security/oauth2/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u32,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCitiesRequest {
    pub keyword: String,
    pub country_code: Option<String>,
}

impl SearchCitiesRequest {
    pub fn new(keyword: impl Into<String>, country_code: Option<String>) -> Self {
        Self {
            keyword: keyword.into(),
            country_code: country_code.filter(|cc| !cc.is_empty()),
        }
    }

    /// Query parameters in the order the upstream expects them.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("keyword", self.keyword.as_str())];
        if let Some(cc) = &self.country_code {
            pairs.push(("countryCode", cc.as_str()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCitiesResponse {
    pub data: Vec<CityResult>,
    pub meta: Meta,
    #[serde(default)]
    pub included: Included,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub sub_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iata_code: Option<String>,
    pub address: Address,
    pub geo_code: GeoCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCode {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub count: u64,
    pub links: MetaLinks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaLinks {
    #[serde(rename = "self")]
    pub self_link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Included {
    #[serde(default)]
    pub airports: HashMap<String, AirportInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportInfo {
    pub name: String,
    pub iata_code: String,
    pub sub_type: String,
}

/// Error envelope returned by Amadeus with any non-2xx status.
///
/// Entries also carry a `status` member; it is ignored because the HTTP
/// status of the response is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub code: i64,
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Tabled)]
pub struct CityTableRow {
    pub name: String,
    pub iata: String,
    pub country: String,
    pub state: String,
    pub latitude: String,
    pub longitude: String,
}
