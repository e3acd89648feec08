//! Native-range extraction: US states and Canadian provinces.
//!
//! Two independent strategies, unioned: uppercase two-letter postal codes
//! validated against the tables, and case-insensitive full-name matching.
//! Output codes are sorted and deduplicated.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::POSTAL_CODE;

/// US state names and USPS codes, 50 states plus DC.
pub const US_STATES: [(&str, &str); 51] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Canadian province and territory names with postal codes.
pub const CA_PROVINCES: [(&str, &str); 13] = [
    ("Alberta", "AB"),
    ("British Columbia", "BC"),
    ("Manitoba", "MB"),
    ("New Brunswick", "NB"),
    ("Newfoundland and Labrador", "NL"),
    ("Northwest Territories", "NT"),
    ("Nova Scotia", "NS"),
    ("Nunavut", "NU"),
    ("Ontario", "ON"),
    ("Prince Edward Island", "PE"),
    ("Quebec", "QC"),
    ("Saskatchewan", "SK"),
    ("Yukon", "YT"),
];

lazy_static! {
    static ref US_STATE_NAME: Regex = name_pattern(&US_STATES);
    static ref CA_PROVINCE_NAME: Regex = name_pattern(&CA_PROVINCES);
}

// Longer names first so "West Virginia" cannot lose to "Virginia" when
// both start at the same position.
fn name_pattern(table: &[(&str, &str)]) -> Regex {
    let mut names: Vec<&str> = table.iter().map(|(name, _)| *name).collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));
    let escaped: Vec<String> = names.into_iter().map(regex::escape).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", escaped.join("|"))).unwrap()
}

fn code_for_name<'t>(table: &[(&str, &'t str)], name: &str) -> Option<&'t str> {
    table
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}

fn is_known_code(table: &[(&str, &str)], code: &str) -> bool {
    table.iter().any(|(_, candidate)| *candidate == code)
}

/// Native-range codes found in one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeRange {
    /// Sorted US state codes.
    pub usa_states: Vec<String>,
    /// Sorted Canadian province codes.
    pub canadian_provinces: Vec<String>,
}

impl NativeRange {
    pub fn is_empty(&self) -> bool {
        self.usa_states.is_empty() && self.canadian_provinces.is_empty()
    }
}

/// Extract US state and Canadian province codes from text.
pub fn extract_native_range(text: &str) -> NativeRange {
    let mut states: BTreeSet<&str> = BTreeSet::new();
    let mut provinces: BTreeSet<&str> = BTreeSet::new();

    for m in US_STATE_NAME.find_iter(text) {
        if let Some(code) = code_for_name(&US_STATES, m.as_str()) {
            states.insert(code);
        }
    }
    for m in CA_PROVINCE_NAME.find_iter(text) {
        if let Some(code) = code_for_name(&CA_PROVINCES, m.as_str()) {
            provinces.insert(code);
        }
    }

    for caps in POSTAL_CODE.captures_iter(text) {
        if let Some(code) = caps.get(1) {
            let code = code.as_str();
            if is_known_code(&US_STATES, code) {
                states.insert(code);
            } else if is_known_code(&CA_PROVINCES, code) {
                provinces.insert(code);
            }
        }
    }

    NativeRange {
        usa_states: states.iter().map(|code| code.to_string()).collect(),
        canadian_provinces: provinces.iter().map(|code| code.to_string()).collect(),
    }
}
