//! Geocoding against Nominatim (OpenStreetMap).
//!
//! Two lookups are supported: forward search (free-text address to
//! coordinates) and reverse lookup (coordinates to address fields). Both are
//! expressed as traits so the enrichment loop can run against a fake in
//! tests.

pub mod nominatim;

use thiserror::Error;

use crate::models::{AddressFields, Coordinate};

pub use nominatim::NominatimClient;

/// Errors from geocoding operations.
///
/// "No match" is not an error: forward search returns `Ok(None)` and reverse
/// lookup returns empty fields.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Transport failure, timeout or unreadable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Remote request failed with HTTP status {status}")]
    Status {
        /// HTTP status code returned.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

impl GeocodeError {
    /// True when the remote service rejected the request with an HTTP status.
    pub fn is_remote_failure(&self) -> bool {
        matches!(self, GeocodeError::Status { .. })
    }
}

/// Coordinates to structured address.
#[allow(async_fn_in_trait)]
pub trait ReverseGeocoder {
    async fn reverse(&self, coordinate: Coordinate) -> Result<AddressFields, GeocodeError>;
}

/// Free-text address to coordinates.
#[allow(async_fn_in_trait)]
pub trait ForwardGeocoder {
    /// `country_codes` is a comma-separated ISO 3166-1 alpha-2 filter.
    async fn search(
        &self,
        address: &str,
        country_codes: &str,
    ) -> Result<Option<Coordinate>, GeocodeError>;
}
