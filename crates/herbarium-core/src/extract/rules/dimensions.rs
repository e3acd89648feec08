//! Height and spread extraction with unit normalization.
//!
//! All output is normalized to inches. Single values collapse to a
//! degenerate range with `min == max`.

use super::patterns::{DIMENSION, HEIGHT_CONTEXT, SPREAD_CONTEXT};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::plant::{DimensionRange, LengthUnit};

/// Confidence assigned to a bare dimension expression.
const DIMENSION_CONFIDENCE: f32 = 0.7;

/// Extractor for dimension expressions ("1 1/2-2 ft.", "60 cm").
pub struct DimensionExtractor {
    /// Matches scoring below this are dropped.
    pub min_confidence: f32,
}

impl FieldExtractor for DimensionExtractor {
    type Output = ExtractionMatch<DimensionRange>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut matches = Vec::new();

        for caps in DIMENSION.captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let unit = match caps.get(3).and_then(|m| parse_unit(m.as_str())) {
                Some(u) => u,
                None => continue,
            };
            let min = match caps.get(1).and_then(|m| parse_number(m.as_str())) {
                Some(v) => v,
                None => continue,
            };
            let max = match caps.get(2) {
                Some(m) => match parse_number(m.as_str()) {
                    Some(v) => v,
                    None => continue,
                },
                None => min,
            };

            let (lo, hi) = if max < min { (max, min) } else { (min, max) };
            let range = DimensionRange::inches(to_inches(lo, unit), to_inches(hi, unit));

            let found = ExtractionMatch::new(range, DIMENSION_CONFIDENCE, whole.as_str())
                .with_position(whole.start(), whole.end());
            if found.confidence >= self.min_confidence {
                matches.push(found);
            }
        }

        matches
    }
}

/// Height and spread found in one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantDimensions {
    pub height: Option<DimensionRange>,
    pub spread: Option<DimensionRange>,
}

/// Extract height and spread from text.
///
/// Spread comes from labeled context only ("Spread:", "Width:"). Height
/// prefers labeled context and falls back to the first bare dimension
/// outside any spread label's tail. Matches scoring below
/// `min_confidence` are ignored.
pub fn extract_dimensions(text: &str, min_confidence: f32) -> PlantDimensions {
    let extractor = DimensionExtractor { min_confidence };

    let mut spread = None;
    let mut spread_spans: Vec<(usize, usize)> = Vec::new();
    for caps in SPREAD_CONTEXT.captures_iter(text) {
        if let Some(tail) = caps.get(1) {
            spread_spans.push((tail.start(), tail.end()));
            if spread.is_none() {
                if let Some(found) = extractor.extract(tail.as_str()) {
                    spread = Some(found.value);
                }
            }
        }
    }

    let mut height = None;
    for caps in HEIGHT_CONTEXT.captures_iter(text) {
        if let Some(tail) = caps.get(1) {
            if let Some(found) = extractor.extract(tail.as_str()) {
                height = Some(found.value);
                break;
            }
        }
    }

    if height.is_none() {
        for found in extractor.extract_all(text) {
            let in_spread_tail = found
                .position
                .map(|(start, _)| spread_spans.iter().any(|(s, e)| start >= *s && start < *e))
                .unwrap_or(false);
            if !in_spread_tail {
                height = Some(found.value);
                break;
            }
        }
    }

    PlantDimensions { height, spread }
}

/// Parse a number that may be whole, decimal, a fraction, or a mixed
/// number ("1 1/2").
fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();

    if let Some((lead, denominator)) = raw.rsplit_once('/') {
        let denominator: f64 = denominator.trim().parse().ok()?;
        if denominator == 0.0 {
            return None;
        }

        let mut parts = lead.split_whitespace();
        let first = parts.next()?;
        match parts.next() {
            Some(numerator) => {
                let whole: f64 = first.parse().ok()?;
                let numerator: f64 = numerator.parse().ok()?;
                Some(whole + numerator / denominator)
            }
            None => {
                let numerator: f64 = first.parse().ok()?;
                Some(numerator / denominator)
            }
        }
    } else {
        raw.parse().ok()
    }
}

fn parse_unit(raw: &str) -> Option<LengthUnit> {
    match raw.trim().trim_end_matches('.').to_lowercase().as_str() {
        "ft" | "feet" | "foot" => Some(LengthUnit::Feet),
        "in" | "inch" | "inches" => Some(LengthUnit::Inches),
        "cm" | "centimeter" | "centimeters" => Some(LengthUnit::Cm),
        "m" | "meter" | "meters" => Some(LengthUnit::M),
        _ => None,
    }
}

fn to_inches(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Inches => value,
        LengthUnit::Feet => value * 12.0,
        LengthUnit::Cm => value / 2.54,
        LengthUnit::M => value / 0.0254,
    }
}
