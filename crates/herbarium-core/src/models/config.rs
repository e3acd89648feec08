//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the herbarium pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HerbariumConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Remote fetch configuration.
    pub fetch: FetchConfig,

    /// Image and thumbnail configuration.
    pub media: MediaConfig,
}

impl Default for HerbariumConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            pdf: PdfConfig::default(),
            fetch: FetchConfig::default(),
            media: MediaConfig::default(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Run record validation and attach warnings to metadata.
    pub validate: bool,

    /// Minimum confidence to accept an extracted field.
    pub min_field_confidence: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            validate: true,
            min_field_confidence: 0.5,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Minimum text length to consider a PDF text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 10,
            min_text_length: 50,
        }
    }
}

/// Remote fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Delay between consecutive requests in milliseconds.
    pub rate_limit_ms: u64,

    /// Retry attempts per request.
    pub retries: u32,

    /// Exponential backoff factor (delay = factor^attempt seconds).
    pub backoff_factor: u32,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            rate_limit_ms: 1000,
            retries: 3,
            backoff_factor: 2,
            user_agent: "PlantFinder-DataFetch/1.0 (https://github.com/example/herbarium)"
                .to_string(),
        }
    }
}

/// Image and thumbnail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Maximum width/height for optimized source images.
    pub max_image_size: u32,

    /// Width of generated thumbnails.
    pub thumbnail_width: u32,

    /// Initial JPEG quality (1-100).
    pub jpeg_quality: u8,

    /// Byte budget for an encoded thumbnail.
    pub thumbnail_max_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_image_size: 1200,
            thumbnail_width: 200,
            jpeg_quality: 85,
            thumbnail_max_bytes: 25 * 1024,
        }
    }
}

impl HerbariumConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let config = HerbariumConfig::default();
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.fetch.rate_limit_ms, 1000);
        assert_eq!(config.fetch.retries, 3);
        assert_eq!(config.fetch.backoff_factor, 2);
        assert_eq!(config.media.max_image_size, 1200);
        assert_eq!(config.media.jpeg_quality, 85);
        assert_eq!(config.media.thumbnail_max_bytes, 25 * 1024);
        assert_eq!(config.pdf.min_text_length, 50);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{"fetch": {"timeout_secs": 5}}"#;
        let config: HerbariumConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.retries, 3);
        assert_eq!(config.media.thumbnail_width, 200);
    }

    #[test]
    fn test_roundtrip() {
        let config = HerbariumConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: HerbariumConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fetch.user_agent, config.fetch.user_agent);
    }
}
