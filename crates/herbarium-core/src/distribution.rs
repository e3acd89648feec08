//! USDA distribution CSV conversion.
//!
//! The PLANTS database ships per-species distribution exports with a
//! banner line above the real header and county-level FIPS codes split
//! across "State FIP" and "County FIP" columns. Conversion keeps rows
//! for the United States, joins valid state and county codes into
//! five-digit FIPS codes, and returns both code sets sorted.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Result type for distribution data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// County and state coverage for a single species.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionData {
    /// Five-digit county FIPS codes (state + county).
    pub fips_codes: Vec<String>,
    /// Two-digit state FIPS codes.
    pub states_fips: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DistributionRow {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "State FIP")]
    state_fip: String,
    #[serde(rename = "County FIP")]
    county_fip: String,
}

/// Convert a raw USDA distribution CSV export into FIPS code sets.
pub fn convert_distribution_csv(raw: &str) -> Result<DistributionData> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    // Exports carry a "Distribution Data ..." banner above the header.
    let body = match text.lines().next() {
        Some(first) if first.starts_with("Distribution Data") => {
            text.split_once('\n').map(|(_, rest)| rest).unwrap_or("")
        }
        _ => text,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    for required in ["Country", "State FIP", "County FIP"] {
        if !headers.iter().any(|h| h == required) {
            return Err(DataError::Malformed(format!(
                "distribution CSV missing column: {}",
                required
            )));
        }
    }

    let mut states = BTreeSet::new();
    let mut fips = BTreeSet::new();

    for row in reader.deserialize() {
        let row: DistributionRow = row?;
        if row.country != "United States" {
            continue;
        }
        if !is_digits(&row.state_fip, 2) {
            continue;
        }
        states.insert(row.state_fip.clone());
        if is_digits(&row.county_fip, 3) {
            fips.insert(format!("{}{}", row.state_fip, row.county_fip));
        }
    }

    Ok(DistributionData {
        fips_codes: fips.into_iter().collect(),
        states_fips: states.into_iter().collect(),
    })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}
