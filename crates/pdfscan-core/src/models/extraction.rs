//! Per-document extraction results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::diagnostics::Diagnostic;

/// How matching ended for one template page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Every anchor on the page was found.
    Complete {
        /// Number of fields processed, ignored ones included.
        matched: usize,
    },
    /// An anchor was missing; fields after it were left unset.
    Aborted {
        matched: usize,
        missing_anchor: String,
    },
    /// The document has no page at this position.
    Missing,
}

impl PageOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }
}

/// Field values extracted from one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentExtraction {
    /// Identifier of the source document (usually its path).
    pub source: String,

    /// Extracted values keyed by field name.
    pub fields: BTreeMap<String, String>,

    /// Outcome for each template page.
    pub pages: Vec<PageOutcome>,

    /// Problems encountered while matching.
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentExtraction {
    /// Create an empty result for `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Value extracted for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Whether every template page matched completely.
    pub fn is_complete(&self) -> bool {
        self.pages.iter().all(PageOutcome::is_complete)
    }
}
