use crate::error::{ProcessingError, Result};

/// Parse a decimal-degree coordinate cell.
///
/// Surrounding whitespace is ignored. Empty, non-numeric and non-finite
/// values (`NaN`, `inf`) are rejected.
///
/// # Examples
/// ```
/// use cep_filler::utils::coordinates::parse_coordinate;
///
/// let lat = parse_coordinate(" -23.55 ").unwrap();
/// assert!((lat - -23.55).abs() < 1e-9);
/// assert!(parse_coordinate("n/a").is_err());
/// ```
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();

    let value = trimmed.parse::<f64>().map_err(|_| {
        ProcessingError::InvalidCoordinate(format!("Invalid coordinate value: '{}'", coord_str))
    })?;

    if !value.is_finite() {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Coordinate is not finite: '{}'",
            coord_str
        )));
    }

    Ok(value)
}
