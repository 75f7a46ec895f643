//! Template compilation and anchor matching.
//!
//! A template page such as `Name:{NAME}Date:{DATE}` is split into the
//! field names `NAME`, `DATE` and the literal anchors `Name:`, `Date:` plus
//! an empty trailing anchor.
//! The matcher then walks those anchors through a target page and takes the
//! text between consecutive anchors as field values.

mod compiler;
mod matcher;
pub mod patterns;

pub use compiler::{CompiledTemplate, TemplateCompiler};
pub use matcher::FieldMatcher;

use crate::error::TemplateError;

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
