//! Error types for the pdfscan-core library.

use thiserror::Error;

/// Main error type for the pdfscan library.
#[derive(Error, Debug)]
pub enum ScanError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Template compilation or persistence error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Result output error.
    #[error("output error: {0}")]
    Output(#[from] csv::Error),

    /// Image encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

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

    /// Failed to extract images from PDF.
    #[error("failed to extract images: {0}")]
    ImageExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// An operation needed a loaded document.
    #[error("no document loaded")]
    NotLoaded,
}

/// Errors related to templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The persisted template could not be parsed.
    #[error("invalid template file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The same field name is defined on more than one page.
    #[error("field {name} defined on page {first_page} and again on page {page}")]
    DuplicateField {
        name: String,
        first_page: usize,
        page: usize,
    },

    /// The template has no pages.
    #[error("template has no pages")]
    Empty,
}

/// Result type for the pdfscan library.
pub type Result<T> = std::result::Result<T, ScanError>;
