//! Nominatim / OpenStreetMap client.
//!
//! The public instance allows **1 request per second** and requires a
//! descriptive `User-Agent`. Pacing is the caller's job; see
//! [`crate::processors::Pacer`].
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/> and
//! <https://nominatim.org/release-docs/develop/api/Reverse/>

use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{ForwardGeocoder, GeocodeError, ReverseGeocoder};
use crate::models::{AddressFields, ClientConfig, Coordinate};
use crate::utils::constants::{
    FORWARD_TIMEOUT_SECS, REVERSE_PATH, REVERSE_TIMEOUT_SECS, SEARCH_LANGUAGE, SEARCH_PATH,
};

const POSTAL_CODE_KEYS: &[&str] = &["postcode", "postalcode"];
const NEIGHBORHOOD_KEYS: &[&str] = &["suburb", "neighbourhood", "city_district"];
const CITY_KEYS: &[&str] = &["city", "town", "municipality", "village", "county"];
const STATE_KEYS: &[&str] = &["state"];
const STREET_KEYS: &[&str] = &["road"];

pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl ForwardGeocoder for NominatimClient {
    async fn search(
        &self,
        address: &str,
        country_codes: &str,
    ) -> Result<Option<Coordinate>, GeocodeError> {
        let resp = self
            .client
            .get(self.endpoint(SEARCH_PATH))
            .query(&[
                ("q", address),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "1"),
                ("countrycodes", country_codes),
                ("accept-language", SEARCH_LANGUAGE),
            ])
            .timeout(Duration::from_secs(FORWARD_TIMEOUT_SECS))
            .send()
            .await?;

        let resp = check_status(resp)?;
        let body: Value = resp.json().await?;
        parse_search_response(&body)
    }
}

impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, coordinate: Coordinate) -> Result<AddressFields, GeocodeError> {
        let lat = coordinate.latitude.to_string();
        let lon = coordinate.longitude.to_string();

        let resp = self
            .client
            .get(self.endpoint(REVERSE_PATH))
            .query(&[
                ("format", "jsonv2"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("addressdetails", "1"),
            ])
            .timeout(Duration::from_secs(REVERSE_TIMEOUT_SECS))
            .send()
            .await?;

        let resp = check_status(resp)?;
        let body: Value = resp.json().await?;
        Ok(parse_reverse_response(&body))
    }
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, GeocodeError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        debug!("Nominatim answered {} for {}", status, resp.url());
        Err(GeocodeError::Status {
            status: status.as_u16(),
        })
    }
}

/// Parses a forward search response (a JSON array of places).
fn parse_search_response(body: &Value) -> Result<Option<Coordinate>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim search response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let latitude = parse_degrees(&first["lat"]).ok_or_else(|| GeocodeError::Parse {
        message: "Missing lat in Nominatim response".to_string(),
    })?;
    let longitude = parse_degrees(&first["lon"]).ok_or_else(|| GeocodeError::Parse {
        message: "Missing lon in Nominatim response".to_string(),
    })?;

    Ok(Some(Coordinate::new(latitude, longitude)))
}

/// Nominatim encodes degrees as strings; plain numbers are accepted too.
fn parse_degrees(value: &Value) -> Option<f64> {
    value
        .as_str()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .or_else(|| value.as_f64())
}

/// Extracts address fields from a reverse response.
///
/// A body without an `address` object (e.g. `{"error": "Unable to geocode"}`)
/// yields empty fields.
fn parse_reverse_response(body: &Value) -> AddressFields {
    let Some(address) = body.get("address").filter(|a| a.is_object()) else {
        return AddressFields::default();
    };

    AddressFields {
        postal_code: first_non_empty(address, POSTAL_CODE_KEYS),
        neighborhood: first_non_empty(address, NEIGHBORHOOD_KEYS),
        city: first_non_empty(address, CITY_KEYS),
        state: first_non_empty(address, STATE_KEYS),
        street: first_non_empty(address, STREET_KEYS),
    }
}

fn first_non_empty(address: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| address.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}
