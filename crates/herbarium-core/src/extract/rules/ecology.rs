//! Wildlife and pollinator tag extraction.
//!
//! Pollinators are canonicalized to lowercase plural forms and kept in
//! source order, first occurrence wins. A monarch mention marks the plant
//! as a host for the Monarch Butterfly.

use super::patterns::{MONARCH, POLLINATOR};
use crate::models::plant::Ecology;

/// Extract wildlife relationships, or `None` when nothing matched.
pub fn extract_ecology(text: &str) -> Option<Ecology> {
    let mut pollinators: Vec<String> = Vec::new();

    for m in POLLINATOR.find_iter(text) {
        let canonical = canonical_pollinator(m.as_str());
        if !pollinators.iter().any(|p| p == canonical) {
            pollinators.push(canonical.to_string());
        }
    }

    let mut host_plant_for = Vec::new();
    if MONARCH.is_match(text) {
        host_plant_for.push("Monarch Butterfly".to_string());
    }

    let ecology = Ecology {
        pollinators,
        host_plant_for,
    };

    if ecology.is_empty() {
        None
    } else {
        Some(ecology)
    }
}

fn canonical_pollinator(word: &str) -> &'static str {
    let lower = word.to_lowercase();
    if lower.starts_with("bee") {
        "bees"
    } else if lower.starts_with("butterfl") {
        "butterflies"
    } else if lower.starts_with("hummingbird") {
        "hummingbirds"
    } else {
        "moths"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pollinators_in_source_order_no_host_key() {
        let ecology = extract_ecology("Attracts: Butterflies, Bees").unwrap();
        assert_eq!(
            ecology.pollinators,
            vec!["butterflies".to_string(), "bees".to_string()]
        );
        assert!(ecology.host_plant_for.is_empty());

        let json = serde_json::to_string(&ecology).unwrap();
        assert_eq!(json, r#"{"pollinators":["butterflies","bees"]}"#);
    }

    #[test]
    fn test_singular_forms_canonicalized() {
        let ecology = extract_ecology("a bee and a moth visit each butterfly").unwrap();
        assert_eq!(
            ecology.pollinators,
            vec![
                "bees".to_string(),
                "moths".to_string(),
                "butterflies".to_string()
            ]
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let ecology = extract_ecology("bees, hummingbirds, and more bees").unwrap();
        assert_eq!(
            ecology.pollinators,
            vec!["bees".to_string(), "hummingbirds".to_string()]
        );
    }

    #[test]
    fn test_monarch_marks_host_plant() {
        let ecology = extract_ecology("Larval host for the monarch.").unwrap();
        assert_eq!(ecology.host_plant_for, vec!["Monarch Butterfly".to_string()]);
        assert!(ecology.pollinators.is_empty());
    }

    #[test]
    fn test_no_keywords_yields_none() {
        assert_eq!(extract_ecology("a quiet green plant"), None);
    }
}
