//! Error types for the herbarium-core library.

use thiserror::Error;

/// Main error type for the herbarium library.
#[derive(Error, Debug)]
pub enum HerbariumError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Source data error (CSV, JSON payloads).
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// Remote fetch error.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Image and thumbnail processing error.
    #[error("media error: {0}")]
    Media(#[from] MediaError),

    /// Image decoding/encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to source data files.
#[derive(Error, Debug)]
pub enum DataError {
    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file does not have the expected shape.
    #[error("malformed data: {0}")]
    Malformed(String),
}

/// Errors related to remote API access.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("request to {url} failed with status {code}")]
    Status { code: u16, url: String },

    /// The response body could not be interpreted.
    #[error("unexpected payload: {0}")]
    Payload(String),

    /// All retry attempts were exhausted.
    #[error("retries exhausted for {0}")]
    RetriesExhausted(String),
}

/// Errors related to image and thumbnail handling.
#[derive(Error, Debug)]
pub enum MediaError {
    /// The source image URL has no recognizable extension.
    #[error("cannot derive thumbnail name from {0}")]
    UnsupportedUrl(String),

    /// The encoded thumbnail cannot fit the byte budget.
    #[error("thumbnail exceeds {limit} bytes at lowest quality")]
    BudgetExceeded { limit: usize },
}

/// Result type for the herbarium library.
pub type Result<T> = std::result::Result<T, HerbariumError>;
