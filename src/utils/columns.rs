use crate::utils::constants::{LAT_CANDIDATES, LAT_PARTIAL_KEYS, LON_CANDIDATES, LON_PARTIAL_KEYS};

/// Resolve a column name from the table headers.
///
/// Headers are scanned in their original order. A header matches exactly if
/// its trimmed form is one of `candidates`, or its lowercased trimmed form
/// equals a lowercased candidate. Only when no header matches exactly are the
/// `partial_keys` tried as substrings of each lowercased trimmed header.
pub fn detect_column<'a>(
    headers: &'a [String],
    candidates: &[&str],
    partial_keys: &[&str],
) -> Option<&'a str> {
    let lowered: Vec<String> = candidates.iter().map(|c| c.to_lowercase()).collect();

    let exact = headers.iter().find(|header| {
        let trimmed = header.trim();
        let low = trimmed.to_lowercase();
        candidates.contains(&trimmed) || lowered.contains(&low)
    });
    if let Some(header) = exact {
        return Some(header.as_str());
    }

    headers
        .iter()
        .find(|header| {
            let low = header.trim().to_lowercase();
            partial_keys.iter().any(|key| low.contains(key))
        })
        .map(String::as_str)
}

/// Latitude and longitude column names, each `None` when undetectable.
pub fn detect_lat_lon(headers: &[String]) -> (Option<&str>, Option<&str>) {
    (
        detect_column(headers, LAT_CANDIDATES, LAT_PARTIAL_KEYS),
        detect_column(headers, LON_CANDIDATES, LON_PARTIAL_KEYS),
    )
}
