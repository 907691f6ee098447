use std::collections::BTreeMap;

use serde::Deserialize;

pub const MIN_QUERY_LENGTH: usize = 2;
pub const MAX_QUERY_LENGTH: usize = 100;

pub const QUERY_FIELD: &str = "Query";
pub const QUERY_REQUIRED: &str = "Please provide a valid search query";
pub const QUERY_TOO_SHORT: &str = "Please provide at least 2 characters in your search query";
pub const QUERY_TOO_LONG: &str =
    "Please ensure your search query does not exceed 100 characters";

/// Field name to the messages of every rule it failed.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Query string of `GET /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequestDto {
    #[serde(rename = "Query", alias = "query", default)]
    pub query: String,
}

impl SearchRequestDto {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Checks the query against every rule and reports all that fail.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut messages = Vec::new();
        let length = self.query.chars().count();

        if self.query.trim().is_empty() {
            messages.push(QUERY_REQUIRED.to_string());
        }
        if length < MIN_QUERY_LENGTH {
            messages.push(QUERY_TOO_SHORT.to_string());
        }
        if length > MAX_QUERY_LENGTH {
            messages.push(QUERY_TOO_LONG.to_string());
        }

        if messages.is_empty() {
            return Ok(());
        }

        let mut errors = ValidationErrors::new();
        errors.insert(QUERY_FIELD.to_string(), messages);
        Err(errors)
    }
}
