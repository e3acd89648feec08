//! Plant attribute extraction over semi-structured text.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use super::rules::{
    extract_bloom, extract_conditions, extract_dimensions, extract_ecology,
    extract_hardiness_zones, extract_native_range,
};
use crate::models::plant::{
    GuideProfile, PlantFields, PlantRecord, RecordMetadata, RecordQuality, EXTRACTOR_VERSION,
};

/// Applies every field extractor to one document and assembles the record.
///
/// Stateless across invocations; malformed input degrades to fewer fields,
/// never to an error.
pub struct PlantExtractor {
    /// Recorded in metadata, not used for extraction.
    source_url: Option<String>,
    /// Whether to attach validation warnings to the record.
    validate: bool,
    /// Minimum confidence for accepting scored matches.
    min_confidence: f32,
}

impl PlantExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            source_url: None,
            validate: true,
            min_confidence: 0.5,
        }
    }

    /// Set the source URL recorded in metadata.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Enable or disable record validation.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Set the minimum confidence threshold.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence;
        self
    }

    /// Extract attributes only.
    ///
    /// A pure function of the input text and the rule set: re-running on
    /// unchanged input reproduces identical values.
    pub fn extract_fields(&self, text: &str) -> PlantFields {
        let dimensions = extract_dimensions(text, self.min_confidence);
        let conditions = extract_conditions(text);
        let bloom = extract_bloom(text);
        let range = extract_native_range(text);

        PlantFields {
            common_name: None,
            scientific_name: None,
            height: dimensions.height,
            spread: dimensions.spread,
            bloom_color: bloom.colors,
            bloom_time: bloom.months,
            bloom_period: bloom.seasons,
            duration: bloom.duration,
            light: conditions.light,
            moisture: conditions.moisture,
            soil: conditions.soil,
            hardiness_zones: extract_hardiness_zones(text),
            usa_states: (!range.usa_states.is_empty()).then_some(range.usa_states),
            canadian_provinces: (!range.canadian_provinces.is_empty())
                .then_some(range.canadian_provinces),
            ecology: extract_ecology(text),
        }
    }

    /// Extract a complete record with metadata.
    pub fn extract(&self, text: &str) -> PlantRecord {
        let start = Instant::now();
        info!(
            "Extracting plant attributes from {} characters of text",
            text.len()
        );

        let fields = self.extract_fields(text);
        self.finish_record(fields, start)
    }

    /// Extract a record from parsed guide sections.
    ///
    /// Names come from the guide header, attributes from its prose
    /// sections, so name warnings reflect the guide rather than the
    /// extraction rules.
    pub fn extract_from_guide(&self, profile: &GuideProfile) -> PlantRecord {
        let start = Instant::now();
        let text = profile.extraction_text();
        info!(
            "Extracting plant attributes from {} characters of guide text",
            text.len()
        );

        let mut fields = self.extract_fields(&text);
        fields.common_name = profile.common_name.clone();
        fields.scientific_name = profile.scientific_name.clone();
        self.finish_record(fields, start)
    }

    fn finish_record(&self, fields: PlantFields, start: Instant) -> PlantRecord {
        let warnings = if self.validate {
            fields.validate()
        } else {
            Vec::new()
        };
        let fields_extracted = fields.count();

        debug!(
            "Extracted {} attributes in {} ms",
            fields_extracted,
            start.elapsed().as_millis()
        );

        PlantRecord {
            fields,
            metadata: RecordMetadata {
                source_url: self.source_url.clone(),
                extracted_at: Utc::now(),
                extractor_version: EXTRACTOR_VERSION.to_string(),
                fields_extracted,
                data_quality: RecordQuality::from_warning_count(warnings.len()),
                warnings,
            },
        }
    }
}

impl Default for PlantExtractor {
    fn default() -> Self {
        Self::new()
    }
}
