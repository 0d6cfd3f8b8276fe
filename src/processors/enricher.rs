use tracing::{debug, warn};

use crate::error::{ProcessingError, Result};
use crate::geocoder::ReverseGeocoder;
use crate::models::{AddressField, AddressFields, Coordinate, EnrichConfig, RecordTable};
use crate::processors::Pacer;
use crate::utils::columns::detect_lat_lon;
use crate::utils::progress::{ProgressReporter, RowStatus};

/// Indices of the coordinate columns used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateColumns {
    pub latitude: usize,
    pub longitude: usize,
}

impl CoordinateColumns {
    /// Detect latitude and longitude columns from the table headers.
    ///
    /// # Errors
    ///
    /// [`ProcessingError::ColumnsNotDetected`] if either column is missing.
    pub fn detect(table: &RecordTable) -> Result<Self> {
        let not_detected = || ProcessingError::ColumnsNotDetected {
            available: table.headers().to_vec(),
        };

        let (lat_name, lon_name) = detect_lat_lon(table.headers());
        let (lat_name, lon_name) = lat_name.zip(lon_name).ok_or_else(not_detected)?;

        let latitude = table.column_index(lat_name).ok_or_else(not_detected)?;
        let longitude = table.column_index(lon_name).ok_or_else(not_detected)?;
        debug!("Using coordinate columns '{}' / '{}'", lat_name, lon_name);

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Counters for one enrichment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub total: usize,
    pub processed: usize,
    pub filled: usize,
    pub skipped_complete: usize,
    pub skipped_invalid: usize,
    pub lookups: usize,
    pub http_failures: usize,
    pub lookup_errors: usize,
}

impl EnrichSummary {
    pub fn detailed_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Enrichment Report ===\n");
        summary.push_str(&format!("Rows: {}/{}\n", self.processed, self.total));
        summary.push_str(&format!("CEPs filled: {}\n", self.filled));
        summary.push_str(&format!(
            "Skipped (already had CEP): {}\n",
            self.skipped_complete
        ));
        summary.push_str(&format!(
            "Skipped (invalid lat/lon): {}\n",
            self.skipped_invalid
        ));
        summary.push_str(&format!("Remote lookups: {}\n", self.lookups));
        summary.push_str(&format!("HTTP failures: {}\n", self.http_failures));
        summary.push_str(&format!("Other lookup errors: {}", self.lookup_errors));

        summary
    }
}

/// Reverse-geocodes table rows in place.
///
/// Rows are visited once, in order. A row whose `CEP` is already set is left
/// alone; otherwise the looked-up fields are merged one by one, never
/// replacing a non-empty cell.
pub struct RowEnricher<G, P> {
    geocoder: G,
    pacer: P,
    config: EnrichConfig,
}

impl<G: ReverseGeocoder, P: Pacer> RowEnricher<G, P> {
    pub fn new(geocoder: G, pacer: P, config: EnrichConfig) -> Self {
        Self {
            geocoder,
            pacer,
            config,
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub async fn enrich(
        &self,
        table: &mut RecordTable,
        columns: CoordinateColumns,
    ) -> EnrichSummary {
        let postal_column = table.ensure_column(AddressField::PostalCode.column_name());
        let field_columns: Vec<(AddressField, usize)> = self
            .config
            .fields
            .fields()
            .iter()
            .map(|&field| (field, table.ensure_column(field.column_name())))
            .collect();

        let total = table.len();
        let progress =
            ProgressReporter::new(total, self.config.log_interval_rows, !self.config.verbose);
        let mut summary = EnrichSummary {
            total,
            ..EnrichSummary::default()
        };

        for row in 0..total {
            summary.processed += 1;

            if !table.value(row, postal_column).trim().is_empty() {
                summary.skipped_complete += 1;
                progress.report(summary.processed, summary.filled, &RowStatus::Skipped);
                continue;
            }

            let coordinate = match Coordinate::parse(
                table.value(row, columns.latitude),
                table.value(row, columns.longitude),
            ) {
                Ok(coordinate) => coordinate,
                Err(e) => {
                    debug!("Row {}: {}", row + 1, e);
                    summary.skipped_invalid += 1;
                    progress.report(
                        summary.processed,
                        summary.filled,
                        &RowStatus::InvalidCoordinates,
                    );
                    continue;
                }
            };

            summary.lookups += 1;
            match self.geocoder.reverse(coordinate).await {
                Ok(address) => {
                    let written = merge_address(table, row, &field_columns, &address);
                    if address.has_postal_code() {
                        summary.filled += 1;
                    }
                    debug!("Row {} {}: {} field(s) written", row + 1, coordinate, written);
                }
                Err(e) if e.is_remote_failure() => {
                    summary.http_failures += 1;
                    warn!("Row {} {}: {}; backing off", row + 1, coordinate, e);
                    self.pacer.pause(self.config.backoff_delay()).await;
                }
                Err(e) => {
                    summary.lookup_errors += 1;
                    debug!("Row {} {}: lookup failed: {}", row + 1, coordinate, e);
                }
            }

            progress.report(
                summary.processed,
                summary.filled,
                &RowStatus::LookedUp {
                    last_postal_code: table.value(row, postal_column).to_string(),
                },
            );

            self.pacer.pause(self.config.base_delay()).await;
        }

        progress.finish();
        summary
    }
}

/// Write each non-empty looked-up value into a cell that is still empty.
/// Returns the number of cells written.
fn merge_address(
    table: &mut RecordTable,
    row: usize,
    field_columns: &[(AddressField, usize)],
    address: &AddressFields,
) -> usize {
    let mut written = 0;

    for &(field, column) in field_columns {
        let value = address.get(field);
        if value.is_empty() || !table.value(row, column).trim().is_empty() {
            continue;
        }
        table.set_value(row, column, value);
        written += 1;
    }

    written
}
