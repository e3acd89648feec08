//! Section parser for USDA plant guide text.
//!
//! Guides follow a loose template: an all-caps common name, the binomial
//! with a plant symbol in parentheses, then prose sections introduced by
//! headers like "Description", "Distribution:" and "Uses". Sections are
//! located by header regexes and cut at the next known header, then
//! whitespace-collapsed and capped to keep downstream records compact.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::GuideProfile;

lazy_static! {
    static ref COMMON_NAME: Regex = Regex::new(r"(?m)^([A-Z][A-Z\s]+)\n").unwrap();
    static ref SCIENTIFIC_NAME: Regex =
        Regex::new(r"([A-Z][a-z]+ [a-z]+(?:\s+[a-z]+)?)\s+\(([^)]+)\)").unwrap();
    static ref FAMILY: Regex = Regex::new(r"General:\s+([^(]+?)\s+Family\s+\(([^)]+)\)").unwrap();
    static ref DESCRIPTION: Regex = Regex::new(
        r"(?s)Description\s+General:(.+?)(?:Distribution|Establishment|Adaptation|Uses)"
    )
    .unwrap();
    static ref DISTRIBUTION: Regex =
        Regex::new(r"(?s)Distribution:(.+?)(?:Establishment|Adaptation|Management|Uses|For)")
            .unwrap();
    static ref ADAPTATION: Regex = Regex::new(
        r"(?s)Adaptation[^:]*:(.+?)(?:Establishment|Management|Uses|Pests|Seeds|Control)"
    )
    .unwrap();
    static ref USES: Regex = Regex::new(
        r"(?s)Uses[^:]*:(.+?)(?:Status|Management|Pests|Seeds|Cultivars|Control|Establishment)"
    )
    .unwrap();
    static ref WILDLIFE: Regex = Regex::new(
        r"(?s)Wildlife:(.+?)(?:Status|Establishment|Management|Pests|Seeds|Uses|Cultivars)"
    )
    .unwrap();
    static ref ETHNOBOTANIC: Regex =
        Regex::new(r"(?s)Ethnobotanic:(.+?)(?:Wildlife|Status|Management|Other|Uses)").unwrap();
    static ref MANAGEMENT: Regex = Regex::new(
        r"(?s)Management[^:]*:(.+?)(?:Pests|Seeds|Cultivars|Control|References|Prepared)"
    )
    .unwrap();
}

/// Maximum lengths per section, in characters.
const DESCRIPTION_CAP: usize = 500;
const DISTRIBUTION_CAP: usize = 300;
const ADAPTATION_CAP: usize = 400;
const USES_CAP: usize = 500;
const WILDLIFE_CAP: usize = 400;
const ETHNOBOTANIC_CAP: usize = 400;
const MANAGEMENT_CAP: usize = 400;

/// Parse USDA guide text into structured sections.
///
/// Sections that cannot be located are left as `None`.
pub fn parse_guide(text: &str) -> GuideProfile {
    let mut profile = GuideProfile::default();

    if let Some(caps) = COMMON_NAME.captures(text) {
        profile.common_name = Some(title_case_words(caps[1].trim()));
    }
    if let Some(caps) = SCIENTIFIC_NAME.captures(text) {
        profile.scientific_name = Some(caps[1].trim().to_string());
        profile.symbol = Some(caps[2].trim().to_uppercase());
    }
    if let Some(caps) = FAMILY.captures(text) {
        profile.family_common = Some(caps[1].trim().to_string());
        profile.family = Some(caps[2].trim().to_string());
    }

    profile.description = capture_section(&DESCRIPTION, text, DESCRIPTION_CAP);
    profile.distribution = capture_section(&DISTRIBUTION, text, DISTRIBUTION_CAP);
    profile.adaptation = capture_section(&ADAPTATION, text, ADAPTATION_CAP);
    profile.uses = capture_section(&USES, text, USES_CAP);
    profile.wildlife = capture_section(&WILDLIFE, text, WILDLIFE_CAP);
    profile.ethnobotanic = capture_section(&ETHNOBOTANIC, text, ETHNOBOTANIC_CAP);
    profile.management = capture_section(&MANAGEMENT, text, MANAGEMENT_CAP);

    profile
}

fn capture_section(pattern: &Regex, text: &str, max_chars: usize) -> Option<String> {
    let caps = pattern.captures(text)?;
    let cleaned = collapse_whitespace(&caps[1]);
    if cleaned.is_empty() {
        return None;
    }
    Some(truncate_chars(&cleaned, max_chars))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn title_case_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PlantExtractor;
    use pretty_assertions::assert_eq;

    const GUIDE_TEXT: &str = r#"Plant Guide
BUTTERFLY MILKWEED
Asclepias tuberosa (ASTU)

Description
General: Milkweed Family (Asclepiadaceae). Butterfly
milkweed is an erect perennial reaching 2-3 ft. with
bright orange flowers.

Distribution: Butterfly milkweed occurs from Texas and
Oklahoma east to Florida. For current distribution consult
the PLANTS Web site.

Adaptation: This species prefers full sun and dry sandy
soils. It is drought tolerant once planted.

Uses
Ethnobotanic: The root was chewed for pleurisy.
Wildlife: Nectar attracts butterflies and hummingbirds;
monarch larvae feed on the foliage.

Management: Plants are slow to emerge in spring.
Pests and Potential Problems: aphids may colonize stems.
"#;

    #[test]
    fn test_parse_guide_names() {
        let profile = parse_guide(GUIDE_TEXT);
        assert_eq!(profile.common_name.as_deref(), Some("Butterfly Milkweed"));
        assert_eq!(profile.scientific_name.as_deref(), Some("Asclepias tuberosa"));
        assert_eq!(profile.symbol.as_deref(), Some("ASTU"));
        assert_eq!(profile.family.as_deref(), Some("Asclepiadaceae"));
        assert_eq!(profile.family_common.as_deref(), Some("Milkweed"));
    }

    #[test]
    fn test_parse_guide_sections() {
        let profile = parse_guide(GUIDE_TEXT);

        let description = profile.description.unwrap();
        assert!(description.starts_with("Milkweed Family (Asclepiadaceae)."));
        assert!(description.contains("bright orange flowers"));

        let distribution = profile.distribution.unwrap();
        assert!(distribution.contains("Texas"));
        assert!(distribution.contains("Florida"));
        // The "For current distribution" boilerplate is cut off.
        assert!(!distribution.contains("PLANTS Web site"));

        let adaptation = profile.adaptation.unwrap();
        assert!(adaptation.contains("full sun"));
        assert!(adaptation.contains("drought tolerant"));

        let uses = profile.uses.unwrap();
        assert!(uses.contains("pleurisy"));

        assert_eq!(
            profile.ethnobotanic.as_deref(),
            Some("The root was chewed for pleurisy.")
        );
        let wildlife = profile.wildlife.unwrap();
        assert!(wildlife.contains("monarch larvae"));
        let management = profile.management.unwrap();
        assert!(management.contains("slow to emerge"));
        assert!(!management.contains("aphids"));
    }

    #[test]
    fn test_parse_guide_empty_text() {
        let profile = parse_guide("");
        assert_eq!(profile, GuideProfile::default());
    }

    #[test]
    fn test_sections_are_capped() {
        let long_body = "word ".repeat(300);
        let text = format!("Description\nGeneral:{}Distribution: here.", long_body);
        let profile = parse_guide(&text);
        let description = profile.description.unwrap();
        assert_eq!(description.chars().count(), DESCRIPTION_CAP);
    }

    #[test]
    fn test_guide_text_feeds_attribute_extraction() {
        let profile = parse_guide(GUIDE_TEXT);
        let fields = PlantExtractor::new().extract_fields(&profile.extraction_text());

        let height = fields.height.unwrap();
        assert_eq!(height.min, 24.0);
        assert_eq!(height.max, 36.0);
        assert_eq!(
            fields.duration,
            Some(crate::models::PlantDuration::Perennial)
        );
        assert_eq!(
            fields.usa_states,
            Some(vec!["FL".to_string(), "OK".to_string(), "TX".to_string()])
        );
        let ecology = fields.ecology.unwrap();
        assert!(ecology.pollinators.contains(&"butterflies".to_string()));
        assert_eq!(ecology.host_plant_for, vec!["Monarch Butterfly".to_string()]);
    }
}
