//! Rule-based attribute extractors for plant text.

pub mod bloom;
pub mod catalog;
pub mod conditions;
pub mod dimensions;
pub mod ecology;
pub mod geography;
pub mod hardiness;
pub mod patterns;

pub use bloom::{extract_bloom, BloomProfile};
pub use catalog::{field_spec, FieldKind, FieldSpec, MatchPolicy, FIELD_CATALOG};
pub use conditions::{extract_conditions, GrowingConditions};
pub use dimensions::{extract_dimensions, DimensionExtractor, PlantDimensions};
pub use ecology::extract_ecology;
pub use geography::{extract_native_range, NativeRange};
pub use hardiness::extract_hardiness_zones;
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
