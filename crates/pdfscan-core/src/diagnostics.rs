//! Non-fatal conditions raised while compiling templates or matching documents.

use thiserror::Error;

/// A recovered problem worth reporting to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A page does not have exactly one more segment than fields.
    #[error("field count mismatch on page {page}: {fields} fields, {segments} segments")]
    FieldCountMismatch {
        /// Page number (1-indexed).
        page: usize,
        fields: usize,
        segments: usize,
    },

    /// A field name is defined on more than one page.
    #[error(
        "field {name} on page {page} was already defined on page {first_page}; later values overwrite earlier ones"
    )]
    DuplicateField {
        name: String,
        /// Page of the first definition (1-indexed).
        first_page: usize,
        /// Page of the repeated definition (1-indexed).
        page: usize,
    },

    /// An anchor could not be located; the rest of the page was skipped.
    #[error(
        "template match failed for {document} on page {page}: could not find \"{anchor}\" (ignoring whitespace); remaining fields on this page are unset"
    )]
    AnchorNotFound {
        document: String,
        /// Page number (1-indexed).
        page: usize,
        /// The literal that was searched for.
        anchor: String,
        /// Field that would have ended at this anchor.
        field: String,
    },

    /// The document and the template have different page counts.
    #[error("{document} has {actual} pages but the template has {expected}")]
    PageCountMismatch {
        document: String,
        expected: usize,
        actual: usize,
    },
}
