//! Common regex patterns for plant attribute extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Dimension patterns. Numbers may be whole, decimal, fractional, or
    // mixed ("1 1/2"); the mixed form must come first in the alternation.
    // Bare "in" is too ambiguous, so inches require "in." or a full word.
    pub static ref DIMENSION: Regex = Regex::new(
        r"(?i)(\d+\s+\d+/\d+|\d+/\d+|\d+\.\d+|\d+)(?:\s*[-–]\s*(\d+\s+\d+/\d+|\d+/\d+|\d+\.\d+|\d+))?\s*(feet\b|foot\b|ft\b\.?|inches\b|inch\b\.?|in\.|centimeters\b|centimeter\b|cm\b\.?|meters\b|meter\b|m\b\.?)"
    ).unwrap();

    // Labeled height context; the tail is re-scanned with DIMENSION.
    pub static ref HEIGHT_CONTEXT: Regex = Regex::new(
        r"(?i)\b(?:(?:plant\s+)?height(?:\s+of)?|grows?\s+(?:up\s+)?to|reach(?:es)?(?:\s+heights?\s+of)?)[\s:]*([^\n]{0,80})"
    ).unwrap();

    // Spread/width is extracted from labeled context only.
    pub static ref SPREAD_CONTEXT: Regex = Regex::new(
        r"(?i)\b(?:spread|width)(?:\s+of)?[\s:]*([^\n]{0,80})"
    ).unwrap();

    // Light requirement phrases; a bare "sun" or "shade" never matches.
    pub static ref LIGHT_PHRASE: Regex = Regex::new(
        r"(?i)\b(full|partial|part)[\s-]+(sun|shade)\b"
    ).unwrap();

    // Moisture keywords. The trailing boundary keeps "moisture" from
    // matching as "moist".
    pub static ref MOISTURE_WORD: Regex = Regex::new(
        r"(?i)\b(dry|medium|moist|wet)\b"
    ).unwrap();

    pub static ref DROUGHT_TOLERANT: Regex = Regex::new(
        r"(?i)\bdrought[\s-]+tolerant\b"
    ).unwrap();

    // Soil keywords, mapped to the canonical vocabulary.
    pub static ref SOIL_WORD: Regex = Regex::new(
        r"(?i)\b(sandy?|loamy?|clay(?:ey)?|rocky|limestone|caliche)\b"
    ).unwrap();

    // Hardiness zones
    pub static ref ZONE_RANGE: Regex = Regex::new(
        r"(?i)\bzones?\s*:?\s*(\d{1,2})\s*(?:[-–]|to|through)\s*(\d{1,2})\b"
    ).unwrap();

    pub static ref ZONE_SINGLE: Regex = Regex::new(
        r"(?i)\bzones?\s*:?\s*(\d{1,2})\b"
    ).unwrap();

    // Two-letter postal codes; uppercase only to limit prose collisions.
    pub static ref POSTAL_CODE: Regex = Regex::new(
        r"\b([A-Z]{2})\b"
    ).unwrap();

    // Ecology keywords
    pub static ref POLLINATOR: Regex = Regex::new(
        r"(?i)\b(bees?|butterfl(?:y|ies)|hummingbirds?|moths?)\b"
    ).unwrap();

    pub static ref MONARCH: Regex = Regex::new(
        r"(?i)\bmonarchs?\b"
    ).unwrap();

    // Bloom color vocabulary
    pub static ref COLOR_WORD: Regex = Regex::new(
        r"(?i)\b(pink|purple|lavender|blue|yellow|orange|red|white|violet|mauve)\b"
    ).unwrap();

    pub static ref BLOOM_COLOR_LABEL: Regex = Regex::new(
        r"(?i)(?:bloom|flower)\s+colou?rs?[\s:]*([^\n]+)"
    ).unwrap();

    // Any sentence carrying one of these words is scanned for colors.
    pub static ref BLOOM_HINT: Regex = Regex::new(
        r"(?i)\b(?:bloom|flower|blossom)\w*"
    ).unwrap();

    // Months are matched case-sensitively capitalized so the modal verb
    // "may" cannot fire.
    pub static ref MONTH_WORD: Regex = Regex::new(
        r"\b(January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec)\b\.?"
    ).unwrap();

    pub static ref MONTH_RANGE: Regex = Regex::new(
        r"\b(January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec)\b\.?\s*(?:[-–]|to|through)\s*(January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec)\b\.?"
    ).unwrap();

    pub static ref SEASON: Regex = Regex::new(
        r"(?i)\b(early|mid|late)?[\s-]*(spring|summer|fall|autumn|winter)\b"
    ).unwrap();

    pub static ref DURATION_WORD: Regex = Regex::new(
        r"(?i)\b(annual|biennial|perennial)\b"
    ).unwrap();
}
