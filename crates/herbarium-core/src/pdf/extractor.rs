//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// Minimum trimmed text length for a PDF to count as text-based.
const DEFAULT_MIN_TEXT_LENGTH: usize = 50;

/// PDF extractor for text-based plant guides.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    min_text_length: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }

    /// Set the minimum text length used to classify a PDF as text-based.
    pub fn with_min_text_length(mut self, len: usize) -> Self {
        self.min_text_length = len;
        self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        if self.document.is_none() {
            return PdfType::Empty;
        }

        match self.extract_text() {
            Ok(text) if text.trim().len() >= self.min_text_length => PdfType::Text,
            Ok(_) => {
                warn!("PDF has no usable text layer");
                PdfType::Scanned
            }
            Err(_) => PdfType::Empty,
        }
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("no document loaded".to_string()));
        }
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page));
        }

        // pdf-extract has no per-page API, so split the full text into
        // even line ranges as an approximation.
        let full_text = self.extract_text()?;
        let lines: Vec<&str> = full_text.lines().collect();
        if lines.is_empty() {
            return Ok(String::new());
        }

        let page_count = page_count as usize;
        let lines_per_page = (lines.len() + page_count - 1) / page_count;
        let start = ((page - 1) as usize) * lines_per_page;
        let end = ((page as usize) * lines_per_page).min(lines.len());

        if start >= lines.len() {
            return Ok(String::new());
        }
        Ok(lines[start..end].join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_analyze_without_document() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.analyze(), PdfType::Empty);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let result = extractor.load(b"not a pdf at all");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_extract_text_requires_document() {
        let extractor = PdfExtractor::new();
        assert!(extractor.extract_text().is_err());
    }

    #[test]
    fn test_page_out_of_range() {
        let extractor = PdfExtractor::new();
        let result = extractor.extract_page_text(1);
        assert!(matches!(result, Err(PdfError::InvalidPage(1))));
    }

    #[test]
    fn test_min_text_length_builder() {
        let extractor = PdfExtractor::new().with_min_text_length(200);
        assert_eq!(extractor.min_text_length, 200);
    }
}
