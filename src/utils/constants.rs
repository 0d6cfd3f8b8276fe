/// Nominatim endpoints
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const SEARCH_PATH: &str = "search";
pub const REVERSE_PATH: &str = "reverse";

/// Client identification required by the Nominatim usage policy
pub const DEFAULT_USER_AGENT: &str = "CEP-Filler/1.0 (contact@example.com)";

/// Request timeouts (seconds)
pub const FORWARD_TIMEOUT_SECS: u64 = 10;
pub const REVERSE_TIMEOUT_SECS: u64 = 20;

/// Forward search defaults
pub const DEFAULT_COUNTRY_CODES: &str = "br";
pub const SEARCH_LANGUAGE: &str = "pt-BR";

/// Processing defaults
pub const DEFAULT_SLEEP_SECONDS: f64 = 1.2;
pub const DEFAULT_LOG_INTERVAL_ROWS: usize = 25;
pub const MIN_BACKOFF_SECONDS: f64 = 2.0;
/// Upper bound (exclusive) accepted for `--sleep-seconds`.
pub const MAX_SLEEP_SECONDS: f64 = 3600.0;

/// Latitude/longitude column detection
pub const LAT_CANDIDATES: &[&str] = &["latitude", "lat", "Latitude", "LATITUDE", "Lat"];
pub const LAT_PARTIAL_KEYS: &[&str] = &["lat"];
pub const LON_CANDIDATES: &[&str] = &[
    "longitude",
    "lon",
    "lng",
    "Longitude",
    "LONGITUDE",
    "Long",
    "LON",
    "LNG",
];
pub const LON_PARTIAL_KEYS: &[&str] = &["lon", "lng", "long"];

/// Leading byte-order mark written to every output file
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
