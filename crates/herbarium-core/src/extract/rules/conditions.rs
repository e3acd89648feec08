//! Light, moisture, and soil requirement extraction.
//!
//! Flags are a union of evidence: every recognized keyword sets its flag,
//! nothing is mutually exclusive. A category with no recognized keyword
//! stays absent.

use super::patterns::{DROUGHT_TOLERANT, LIGHT_PHRASE, MOISTURE_WORD, SOIL_WORD};
use crate::models::plant::{LightRequirement, MoistureRequirement, SoilPreference, SoilType};

/// Growing conditions found in one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowingConditions {
    pub light: Option<LightRequirement>,
    pub moisture: Option<MoistureRequirement>,
    pub soil: Option<SoilPreference>,
}

/// Extract light, moisture, and soil requirements from text.
pub fn extract_conditions(text: &str) -> GrowingConditions {
    GrowingConditions {
        light: extract_light(text),
        moisture: extract_moisture(text),
        soil: extract_soil(text),
    }
}

fn extract_light(text: &str) -> Option<LightRequirement> {
    let mut light = LightRequirement::default();

    for caps in LIGHT_PHRASE.captures_iter(text) {
        let qualifier = caps.get(1).map(|m| m.as_str().to_lowercase());
        let kind = caps.get(2).map(|m| m.as_str().to_lowercase());
        match (qualifier.as_deref(), kind.as_deref()) {
            (Some("full"), Some("sun")) => light.full_sun = true,
            (Some("partial") | Some("part"), Some("sun")) => light.partial_sun = true,
            (Some("partial") | Some("part"), Some("shade")) => light.partial_shade = true,
            (Some("full"), Some("shade")) => light.full_shade = true,
            _ => {}
        }
    }

    light.any().then_some(light)
}

fn extract_moisture(text: &str) -> Option<MoistureRequirement> {
    let mut moisture = MoistureRequirement::default();

    for caps in MOISTURE_WORD.captures_iter(text) {
        if let Some(word) = caps.get(1) {
            match word.as_str().to_lowercase().as_str() {
                "dry" => moisture.dry = true,
                "medium" => moisture.medium = true,
                "moist" => moisture.moist = true,
                "wet" => moisture.wet = true,
                _ => {}
            }
        }
    }

    if DROUGHT_TOLERANT.is_match(text) {
        moisture.drought_tolerant = true;
    }

    moisture.any().then_some(moisture)
}

fn extract_soil(text: &str) -> Option<SoilPreference> {
    let mut types: Vec<SoilType> = Vec::new();

    for caps in SOIL_WORD.captures_iter(text) {
        if let Some(word) = caps.get(1) {
            if let Some(soil) = SoilType::from_keyword(word.as_str()) {
                if !types.contains(&soil) {
                    types.push(soil);
                }
            }
        }
    }

    if types.is_empty() {
        None
    } else {
        Some(SoilPreference { types })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_light_flags_union() {
        let light = extract_conditions("Thrives in full sun to partial shade.")
            .light
            .unwrap();
        assert!(light.full_sun);
        assert!(light.partial_shade);
        assert!(!light.partial_sun);
        assert!(!light.full_shade);
    }

    #[test]
    fn test_part_sun_counts_as_partial() {
        let light = extract_conditions("part sun or part shade").light.unwrap();
        assert!(light.partial_sun);
        assert!(light.partial_shade);
    }

    #[test]
    fn test_bare_sun_or_shade_sets_nothing() {
        let conditions = extract_conditions("Grows in sun or shade near the fence.");
        assert_eq!(conditions.light, None);
    }

    #[test]
    fn test_moisture_words() {
        let moisture = extract_conditions("dry to medium, even wet sites").moisture.unwrap();
        assert!(moisture.dry);
        assert!(moisture.medium);
        assert!(moisture.wet);
        assert!(!moisture.moist);
    }

    #[test]
    fn test_moisture_word_not_triggered_by_moisture() {
        let conditions = extract_conditions("Soil moisture varies.");
        assert_eq!(conditions.moisture, None);
    }

    #[test]
    fn test_drought_tolerant_both_spellings() {
        assert!(
            extract_conditions("very drought tolerant")
                .moisture
                .unwrap()
                .drought_tolerant
        );
        assert!(
            extract_conditions("a drought-tolerant native")
                .moisture
                .unwrap()
                .drought_tolerant
        );
    }

    #[test]
    fn test_soil_keywords_map_to_vocabulary() {
        let soil = extract_conditions("Sandy loam over limestone").soil.unwrap();
        assert_eq!(
            soil.types,
            vec![SoilType::Sand, SoilType::Loam, SoilType::Rocky]
        );
    }

    #[test]
    fn test_soil_deduplicates() {
        let soil = extract_conditions("sand, sandy, more sand").soil.unwrap();
        assert_eq!(soil.types, vec![SoilType::Sand]);
    }

    #[test]
    fn test_absent_categories_stay_absent() {
        let conditions = extract_conditions("A tall plant with orange flowers.");
        assert_eq!(conditions, GrowingConditions::default());
    }
}
