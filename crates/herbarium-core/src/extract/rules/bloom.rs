//! Bloom color, bloom months, bloom seasons, and life-cycle extraction.
//!
//! Colors come from a labeled "Bloom Color:" line when one exists, else
//! from any sentence that mentions blooming or flowering. Months emit as
//! three-letter abbreviations; month ranges expand inclusively and may
//! wrap the year end ("November to February").

use super::patterns::{
    BLOOM_COLOR_LABEL, BLOOM_HINT, COLOR_WORD, DURATION_WORD, MONTH_RANGE, MONTH_WORD, SEASON,
};
use crate::models::plant::PlantDuration;

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Bloom attributes found in one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BloomProfile {
    /// Title-Case colors, source order.
    pub colors: Option<Vec<String>>,
    /// Three-letter month abbreviations, source order.
    pub months: Option<Vec<String>>,
    /// Title-Case season phrases, source order.
    pub seasons: Option<Vec<String>>,
    /// Life cycle, first match wins.
    pub duration: Option<PlantDuration>,
}

/// Extract all bloom attributes from text.
pub fn extract_bloom(text: &str) -> BloomProfile {
    BloomProfile {
        colors: extract_colors(text),
        months: extract_months(text),
        seasons: extract_seasons(text),
        duration: extract_duration(text),
    }
}

fn extract_colors(text: &str) -> Option<Vec<String>> {
    if let Some(caps) = BLOOM_COLOR_LABEL.captures(text) {
        if let Some(tail) = caps.get(1) {
            let colors = colors_in(tail.as_str());
            if !colors.is_empty() {
                return Some(colors);
            }
        }
    }

    let mut colors = Vec::new();
    for sentence in sentences(text) {
        if !BLOOM_HINT.is_match(sentence) {
            continue;
        }
        for m in COLOR_WORD.find_iter(sentence) {
            push_unique(&mut colors, title_case(m.as_str()));
        }
    }

    (!colors.is_empty()).then_some(colors)
}

fn colors_in(tail: &str) -> Vec<String> {
    let mut colors = Vec::new();
    for m in COLOR_WORD.find_iter(tail) {
        push_unique(&mut colors, title_case(m.as_str()));
    }
    colors
}

fn extract_months(text: &str) -> Option<Vec<String>> {
    // (start, step, month index); step keeps expanded range members in
    // calendar order when sorting by source position.
    let mut found: Vec<(usize, usize, usize)> = Vec::new();
    let mut range_spans: Vec<(usize, usize)> = Vec::new();

    for caps in MONTH_RANGE.captures_iter(text) {
        let (whole, from, to) = match (caps.get(0), caps.get(1), caps.get(2)) {
            (Some(w), Some(f), Some(t)) => (w, f, t),
            _ => continue,
        };
        let (from, to) = match (month_index(from.as_str()), month_index(to.as_str())) {
            (Some(f), Some(t)) => (f, t),
            _ => continue,
        };
        range_spans.push((whole.start(), whole.end()));

        // Wrap past December when the range runs across the year end.
        let span = if to >= from { to - from } else { 12 - from + to };
        for step in 0..=span {
            found.push((whole.start(), step, (from + step) % 12));
        }
    }

    for m in MONTH_WORD.find_iter(text) {
        let inside_range = range_spans
            .iter()
            .any(|(s, e)| m.start() >= *s && m.start() < *e);
        if inside_range {
            continue;
        }
        if let Some(idx) = month_index(m.as_str()) {
            found.push((m.start(), 0, idx));
        }
    }

    found.sort_by_key(|(pos, step, _)| (*pos, *step));

    let mut months = Vec::new();
    for (_, _, idx) in found {
        push_unique(&mut months, MONTH_ABBREVS[idx].to_string());
    }

    (!months.is_empty()).then_some(months)
}

fn extract_seasons(text: &str) -> Option<Vec<String>> {
    let mut seasons = Vec::new();

    for caps in SEASON.captures_iter(text) {
        let word = match caps.get(2) {
            Some(m) => m.as_str(),
            None => continue,
        };

        let mut canonical = String::new();
        if let Some(prefix) = caps.get(1) {
            canonical.push_str(&title_case(prefix.as_str()));
            canonical.push(' ');
        }
        if word.eq_ignore_ascii_case("autumn") {
            canonical.push_str("Fall");
        } else {
            canonical.push_str(&title_case(word));
        }

        push_unique(&mut seasons, canonical);
    }

    (!seasons.is_empty()).then_some(seasons)
}

fn extract_duration(text: &str) -> Option<PlantDuration> {
    DURATION_WORD
        .find(text)
        .and_then(|m| PlantDuration::from_str(m.as_str()))
}

/// Split on sentence-ending punctuation and newlines.
fn sentences(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if ch == '.' || ch == ';' || ch == '\n' {
            if idx > start {
                result.push(&text[start..idx]);
            }
            start = idx + ch.len_utf8();
        }
    }
    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}

fn month_index(word: &str) -> Option<usize> {
    let word = word.trim_end_matches('.');
    let key: String = word.chars().take(3).collect::<String>().to_lowercase();
    match key.as_str() {
        "jan" => Some(0),
        "feb" => Some(1),
        "mar" => Some(2),
        "apr" => Some(3),
        "may" => Some(4),
        "jun" => Some(5),
        "jul" => Some(6),
        "aug" => Some(7),
        "sep" => Some(8),
        "oct" => Some(9),
        "nov" => Some(10),
        "dec" => Some(11),
        _ => None,
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labeled_color_line_preferred() {
        let bloom = extract_bloom("Bloom Color: orange , yellow\nThe pink mulch looks nice.");
        assert_eq!(
            bloom.colors,
            Some(vec!["Orange".to_string(), "Yellow".to_string()])
        );
    }

    #[test]
    fn test_colors_only_from_bloom_sentences() {
        let bloom = extract_bloom("Blue sky above the meadow. Yellow blooms all summer.");
        assert_eq!(bloom.colors, Some(vec!["Yellow".to_string()]));
    }

    #[test]
    fn test_colors_deduplicated_in_source_order() {
        let bloom = extract_bloom("Red flowers fade; later the red blooms turn white.");
        assert_eq!(
            bloom.colors,
            Some(vec!["Red".to_string(), "White".to_string()])
        );
    }

    #[test]
    fn test_months_as_three_letter_abbreviations() {
        let bloom = extract_bloom("Blooms May, June, and July.");
        assert_eq!(
            bloom.months,
            Some(vec!["May".to_string(), "Jun".to_string(), "Jul".to_string()])
        );
    }

    #[test]
    fn test_modal_may_ignored() {
        let bloom = extract_bloom("It may flower again in June.");
        assert_eq!(bloom.months, Some(vec!["Jun".to_string()]));
    }

    #[test]
    fn test_month_range_expands() {
        let bloom = extract_bloom("April to June");
        assert_eq!(
            bloom.months,
            Some(vec!["Apr".to_string(), "May".to_string(), "Jun".to_string()])
        );
    }

    #[test]
    fn test_abbreviated_month_range_with_dots() {
        let bloom = extract_bloom("Sept.-Nov.");
        assert_eq!(
            bloom.months,
            Some(vec!["Sep".to_string(), "Oct".to_string(), "Nov".to_string()])
        );
    }

    #[test]
    fn test_month_range_wraps_year_end() {
        let bloom = extract_bloom("November to February in the far south");
        assert_eq!(
            bloom.months,
            Some(vec![
                "Nov".to_string(),
                "Dec".to_string(),
                "Jan".to_string(),
                "Feb".to_string()
            ])
        );
    }

    #[test]
    fn test_seasons_title_case_with_qualifier() {
        let bloom = extract_bloom("Flowers from summer into early fall.");
        assert_eq!(
            bloom.seasons,
            Some(vec!["Summer".to_string(), "Early Fall".to_string()])
        );
    }

    #[test]
    fn test_autumn_becomes_fall() {
        let bloom = extract_bloom("colorful in late autumn");
        assert_eq!(bloom.seasons, Some(vec!["Late Fall".to_string()]));
    }

    #[test]
    fn test_duration_first_match_wins() {
        let bloom = extract_bloom("Grown as a biennial, sometimes perennial.");
        assert_eq!(bloom.duration, Some(PlantDuration::Biennial));
    }

    #[test]
    fn test_empty_text_yields_all_absent() {
        assert_eq!(extract_bloom(""), BloomProfile::default());
    }
}
