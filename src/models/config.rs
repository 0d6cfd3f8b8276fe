use std::time::Duration;
use validator::Validate;

use crate::models::FieldSelection;
use crate::utils::constants::{
    DEFAULT_LOG_INTERVAL_ROWS, DEFAULT_NOMINATIM_URL, DEFAULT_SLEEP_SECONDS, DEFAULT_USER_AGENT,
    MAX_SLEEP_SECONDS, MIN_BACKOFF_SECONDS,
};

/// Settings for one reverse-enrichment run.
#[derive(Debug, Clone, Validate)]
pub struct EnrichConfig {
    // exclusive_max also rejects NaN and infinity
    #[validate(range(min = 0.0, exclusive_max = MAX_SLEEP_SECONDS))]
    pub sleep_seconds: f64,

    #[validate(range(min = 1))]
    pub log_interval_rows: usize,

    pub fields: FieldSelection,

    pub verbose: bool,
}

impl EnrichConfig {
    /// Pause between consecutive looked-up rows.
    pub fn base_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.sleep_seconds).unwrap_or(Duration::ZERO)
    }

    /// Extra pause after the remote service answered with an HTTP error:
    /// twice the base delay, never below [`MIN_BACKOFF_SECONDS`].
    pub fn backoff_delay(&self) -> Duration {
        self.base_delay()
            .saturating_mul(2)
            .max(Duration::from_secs_f64(MIN_BACKOFF_SECONDS))
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            sleep_seconds: DEFAULT_SLEEP_SECONDS,
            log_interval_rows: DEFAULT_LOG_INTERVAL_ROWS,
            fields: FieldSelection::default(),
            verbose: false,
        }
    }
}

/// Connection settings for the Nominatim client.
#[derive(Debug, Clone, Validate)]
pub struct ClientConfig {
    #[validate(length(min = 1))]
    pub base_url: String,

    #[validate(length(min = 1))]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
