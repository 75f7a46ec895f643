//! PDF processing module.

mod extractor;
mod images;

pub use extractor::PdfExtractor;
pub use images::dump_images;

use std::path::Path;

use crate::error::PdfError;
use crate::text::normalize_pages;
use image::DynamicImage;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the raw text of every page, in reading order.
    fn extract_page_texts(&self) -> Result<Vec<String>>;

    /// Extract embedded images from a page (1-indexed).
    fn extract_images(&self, page: u32) -> Result<Vec<DynamicImage>>;
}

/// Read a PDF file into `processor` and return its whitespace-normalized pages.
pub fn load_normalized_pages<P: PdfProcessor + ?Sized>(
    processor: &mut P,
    path: &Path,
) -> crate::error::Result<Vec<String>> {
    let data = std::fs::read(path)?;
    processor.load(&data)?;
    let pages = processor.extract_page_texts()?;
    Ok(normalize_pages(&pages))
}
