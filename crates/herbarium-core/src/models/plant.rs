//! Plant data models compatible with the PlantFinder JSON format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version stamp written into every extracted record.
pub const EXTRACTOR_VERSION: &str = "2.0.0";

/// A numeric range with an explicit unit.
///
/// All extractors normalize to inches; other units survive only when a
/// record is deserialized from an external source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRange {
    /// Lower bound of the range.
    pub min: f64,

    /// Upper bound of the range (equal to `min` for single values).
    pub max: f64,

    /// Unit the bounds are expressed in.
    pub unit: LengthUnit,
}

impl DimensionRange {
    /// Range in inches. Single values collapse to `min == max`.
    pub fn inches(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            unit: LengthUnit::Inches,
        }
    }
}

/// Unit of a [`DimensionRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Inches,
    Feet,
    Cm,
    M,
}

/// Light requirement flags.
///
/// Field names serialize as-is; the upstream interface uses snake_case for
/// these keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightRequirement {
    #[serde(default)]
    pub full_sun: bool,

    #[serde(default)]
    pub partial_sun: bool,

    #[serde(default)]
    pub partial_shade: bool,

    #[serde(default)]
    pub full_shade: bool,
}

impl LightRequirement {
    /// Whether any flag is set.
    pub fn any(&self) -> bool {
        self.full_sun || self.partial_sun || self.partial_shade || self.full_shade
    }
}

/// Moisture requirement flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoistureRequirement {
    #[serde(default)]
    pub dry: bool,

    #[serde(default)]
    pub medium: bool,

    #[serde(default)]
    pub moist: bool,

    #[serde(default)]
    pub wet: bool,

    #[serde(default)]
    pub drought_tolerant: bool,
}

impl MoistureRequirement {
    /// Whether any flag is set.
    pub fn any(&self) -> bool {
        self.dry || self.medium || self.moist || self.wet || self.drought_tolerant
    }
}

/// Recognized soil type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Sand,
    Loam,
    Clay,
    Rocky,
}

impl SoilType {
    /// Map a soil keyword to its canonical type.
    ///
    /// "limestone" and "caliche" both indicate rocky substrates.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "sand" | "sandy" => Some(SoilType::Sand),
            "loam" | "loamy" => Some(SoilType::Loam),
            "clay" | "clayey" => Some(SoilType::Clay),
            "rocky" | "limestone" | "caliche" => Some(SoilType::Rocky),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilType::Sand => write!(f, "sand"),
            SoilType::Loam => write!(f, "loam"),
            SoilType::Clay => write!(f, "clay"),
            SoilType::Rocky => write!(f, "rocky"),
        }
    }
}

/// Soil preference as a list of recognized types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilPreference {
    pub types: Vec<SoilType>,
}

/// Plant life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantDuration {
    Annual,
    Biennial,
    Perennial,
}

impl PlantDuration {
    /// Parse a duration keyword, case-insensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "annual" => Some(PlantDuration::Annual),
            "biennial" => Some(PlantDuration::Biennial),
            "perennial" => Some(PlantDuration::Perennial),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlantDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlantDuration::Annual => write!(f, "annual"),
            PlantDuration::Biennial => write!(f, "biennial"),
            PlantDuration::Perennial => write!(f, "perennial"),
        }
    }
}

/// Wildlife relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ecology {
    /// Pollinator categories in source order, lowercase plural.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pollinators: Vec<String>,

    /// Species this plant hosts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host_plant_for: Vec<String>,
}

impl Ecology {
    /// Whether both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.pollinators.is_empty() && self.host_plant_for.is_empty()
    }
}

/// The attribute set the extraction engine can emit.
///
/// Every field is optional; an attribute the rules could not find is
/// omitted from the serialized output entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantFields {
    /// Common name, when the source carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,

    /// Scientific (binomial) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,

    /// Mature height, normalized to inches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<DimensionRange>,

    /// Mature spread/width, normalized to inches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<DimensionRange>,

    /// Bloom colors, Title Case, source order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bloom_color: Option<Vec<String>>,

    /// Bloom months as three-letter abbreviations ("May", "Jun").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bloom_time: Option<Vec<String>>,

    /// Bloom seasons, Title Case ("Summer", "Early Fall").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bloom_period: Option<Vec<String>>,

    /// Life cycle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<PlantDuration>,

    /// Light requirement flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<LightRequirement>,

    /// Moisture requirement flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moisture: Option<MoistureRequirement>,

    /// Soil preference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil: Option<SoilPreference>,

    /// USDA hardiness zones as strings, ascending numeric order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardiness_zones: Option<Vec<String>>,

    /// Native-range US state codes, sorted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usa_states: Option<Vec<String>>,

    /// Native-range Canadian province codes, sorted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canadian_provinces: Option<Vec<String>>,

    /// Wildlife relationships; absent when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecology: Option<Ecology>,
}

impl PlantFields {
    /// Number of extracted attributes (names excluded).
    pub fn count(&self) -> usize {
        [
            self.height.is_some(),
            self.spread.is_some(),
            self.bloom_color.is_some(),
            self.bloom_time.is_some(),
            self.bloom_period.is_some(),
            self.duration.is_some(),
            self.light.is_some(),
            self.moisture.is_some(),
            self.soil.is_some(),
            self.hardiness_zones.is_some(),
            self.usa_states.is_some(),
            self.canadian_provinces.is_some(),
            self.ecology.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Whether no attribute was extracted.
    pub fn is_empty(&self) -> bool {
        self.count() == 0 && self.common_name.is_none() && self.scientific_name.is_none()
    }

    /// Validate the record and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.scientific_name.is_none() && self.common_name.is_none() {
            issues.push("Missing both scientific name and common name".to_string());
        }

        if self.height.is_none() {
            issues.push("Missing height information".to_string());
        }

        if self.bloom_color.is_none() {
            issues.push("Missing bloom color information".to_string());
        }

        if self.light.is_none() {
            issues.push("Missing light requirements".to_string());
        }

        if self.moisture.is_none() {
            issues.push("Missing moisture requirements".to_string());
        }

        issues
    }
}

/// A complete extracted plant record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantRecord {
    /// Extracted attributes, flattened into the record body.
    #[serde(flatten)]
    pub fields: PlantFields,

    /// Extraction metadata.
    pub metadata: RecordMetadata,
}

/// Metadata about the extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    /// Where the source document came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// When extraction ran (UTC).
    pub extracted_at: DateTime<Utc>,

    /// Version of the extraction rules.
    pub extractor_version: String,

    /// Number of attributes extracted.
    pub fields_extracted: usize,

    /// Data completeness assessment.
    pub data_quality: RecordQuality,

    /// Validation issues encountered during extraction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Three-level completeness assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordQuality {
    /// No validation warnings.
    Complete,
    /// At most two warnings.
    Partial,
    /// More than two warnings.
    Minimal,
}

impl RecordQuality {
    /// Assess quality from the number of validation warnings.
    pub fn from_warning_count(count: usize) -> Self {
        match count {
            0 => RecordQuality::Complete,
            1 | 2 => RecordQuality::Partial,
            _ => RecordQuality::Minimal,
        }
    }
}

impl std::fmt::Display for RecordQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordQuality::Complete => write!(f, "complete"),
            RecordQuality::Partial => write!(f, "partial"),
            RecordQuality::Minimal => write!(f, "minimal"),
        }
    }
}

/// Structured sections parsed from a USDA plant guide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideProfile {
    /// Common name from the guide's leading all-caps line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,

    /// Scientific name (binomial preceding the symbol).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,

    /// USDA plant symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// Scientific family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Common family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_common: Option<String>,

    /// "Description / General" section, capped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// "Distribution" section, capped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,

    /// "Adaptation" section, capped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adaptation: Option<String>,

    /// "Uses" section, capped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,

    /// "Wildlife" subsection, capped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildlife: Option<String>,

    /// "Ethnobotanic" subsection, capped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethnobotanic: Option<String>,

    /// "Management" section, capped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management: Option<String>,
}

impl GuideProfile {
    /// Concatenated prose sections suitable for attribute extraction.
    pub fn extraction_text(&self) -> String {
        let mut parts = Vec::new();
        for section in [
            &self.description,
            &self.adaptation,
            &self.distribution,
            &self.uses,
            &self.wildlife,
        ] {
            if let Some(text) = section {
                parts.push(text.as_str());
            }
        }
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dimension_range_serializes_unit_inches() {
        let range = DimensionRange::inches(12.0, 36.0);
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"min":12.0,"max":36.0,"unit":"inches"}"#);
    }

    #[test]
    fn test_light_keys_stay_snake_case() {
        let light = LightRequirement {
            full_sun: true,
            partial_sun: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&light).unwrap();
        assert!(json.contains("\"full_sun\":true"));
        assert!(json.contains("\"partial_sun\":true"));
        assert!(json.contains("\"full_shade\":false"));
    }

    #[test]
    fn test_moisture_drought_tolerant_is_camel_case() {
        let moisture = MoistureRequirement {
            dry: true,
            drought_tolerant: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&moisture).unwrap();
        assert!(json.contains("\"droughtTolerant\":true"));
    }

    #[test]
    fn test_soil_keyword_mapping() {
        assert_eq!(SoilType::from_keyword("sandy"), Some(SoilType::Sand));
        assert_eq!(SoilType::from_keyword("Limestone"), Some(SoilType::Rocky));
        assert_eq!(SoilType::from_keyword("caliche"), Some(SoilType::Rocky));
        assert_eq!(SoilType::from_keyword("peat"), None);
    }

    #[test]
    fn test_empty_fields_serialize_to_empty_object() {
        let fields = PlantFields::default();
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_field_keys_are_camel_case() {
        let fields = PlantFields {
            hardiness_zones: Some(vec!["3".to_string(), "4".to_string()]),
            usa_states: Some(vec!["TX".to_string()]),
            ecology: Some(Ecology {
                pollinators: vec!["bees".to_string()],
                host_plant_for: vec!["Monarch Butterfly".to_string()],
            }),
            ..Default::default()
        };
        let json = serde_json::to_string(&fields).unwrap();
        assert!(json.contains("\"hardinessZones\""));
        assert!(json.contains("\"usaStates\""));
        assert!(json.contains("\"hostPlantFor\""));
        assert!(!json.contains("\"height\""));
    }

    #[test]
    fn test_validate_reports_missing_core_attributes() {
        let issues = PlantFields::default().validate();
        assert_eq!(issues.len(), 5);
        assert_eq!(issues[0], "Missing both scientific name and common name");

        let with_name = PlantFields {
            common_name: Some("Butterfly Weed".to_string()),
            ..Default::default()
        };
        assert_eq!(with_name.validate().len(), 4);
    }

    #[test]
    fn test_quality_thresholds() {
        assert_eq!(RecordQuality::from_warning_count(0), RecordQuality::Complete);
        assert_eq!(RecordQuality::from_warning_count(2), RecordQuality::Partial);
        assert_eq!(RecordQuality::from_warning_count(3), RecordQuality::Minimal);
    }

    #[test]
    fn test_duration_parse() {
        assert_eq!(PlantDuration::from_str("Perennial"), Some(PlantDuration::Perennial));
        assert_eq!(PlantDuration::from_str("ANNUAL"), Some(PlantDuration::Annual));
        assert_eq!(PlantDuration::from_str("evergreen"), None);
    }
}
