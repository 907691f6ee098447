use crate::types::{CityResult, CityTableRow};

/// Trims and upper-cases an ISO country code; blank input means no filter.
pub fn normalize_country_code(code: Option<String>) -> Option<String> {
    code.map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
}

pub fn city_table_rows(cities: &[CityResult]) -> Vec<CityTableRow> {
    cities
        .iter()
        .map(|city| CityTableRow {
            name: city.name.clone(),
            iata: city.iata_code.clone().unwrap_or_else(|| "-".to_string()),
            country: city.address.country_code.clone(),
            state: city
                .address
                .state_code
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            latitude: format!("{:.5}", city.geo_code.latitude),
            longitude: format!("{:.5}", city.geo_code.longitude),
        })
        .collect()
}
