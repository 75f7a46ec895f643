//! Core library for template-based field extraction from fixed-layout PDFs.
//!
//! This crate provides:
//! - Template compilation: `{FIELD}` placeholders in a reference document
//!   become field names, the text around them becomes literal anchors
//! - Anchor matching: field values are carved out of target documents
//!   page by page, with per-page recovery when an anchor is missing
//! - PDF page text and image extraction
//! - CSV result output and batch scanning

pub mod diagnostics;
pub mod error;
pub mod models;
pub mod output;
pub mod pdf;
pub mod scanner;
pub mod template;
pub mod text;

pub use diagnostics::Diagnostic;
pub use error::{PdfError, Result, ScanError, TemplateError};
pub use models::config::{MatcherConfig, ScanConfig};
pub use models::extraction::{DocumentExtraction, PageOutcome};
pub use models::template::{Template, TemplatePage};
pub use output::{CsvSink, ResultSink};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use scanner::{BatchReport, BatchScanner, SkippedDocument};
pub use template::{CompiledTemplate, FieldMatcher, TemplateCompiler};
