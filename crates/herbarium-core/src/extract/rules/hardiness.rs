//! USDA hardiness zone extraction.
//!
//! An explicit range ("Zone 3-8") beats discrete mentions; the first valid
//! range wins. Zones outside 0-13 are rejected. A reversed range does not
//! match and falls through to discrete collection.

use std::collections::BTreeSet;

use super::patterns::{ZONE_RANGE, ZONE_SINGLE};

const MAX_ZONE: u8 = 13;

/// Extract hardiness zones as strings in ascending numeric order.
pub fn extract_hardiness_zones(text: &str) -> Option<Vec<String>> {
    for caps in ZONE_RANGE.captures_iter(text) {
        let lo = caps.get(1).and_then(|m| m.as_str().parse::<u8>().ok());
        let hi = caps.get(2).and_then(|m| m.as_str().parse::<u8>().ok());
        if let (Some(lo), Some(hi)) = (lo, hi) {
            if lo <= hi && hi <= MAX_ZONE {
                return Some((lo..=hi).map(|z| z.to_string()).collect());
            }
        }
    }

    let zones: BTreeSet<u8> = ZONE_SINGLE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<u8>().ok())
        .filter(|z| *z <= MAX_ZONE)
        .collect();

    if zones.is_empty() {
        None
    } else {
        Some(zones.iter().map(|z| z.to_string()).collect())
    }
}
