//! Compiled template model and its JSON persistence.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::error::{Result, TemplateError};

/// A compiled template: literal anchors and field names for each page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Pages in document order.
    pub pages: Vec<TemplatePage>,
}

/// Fields and anchors of a single template page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePage {
    /// Placeholder names in order of appearance.
    pub fields: Vec<String>,

    /// Literal text around the placeholders; one more entry than `fields`.
    pub segments: Vec<String>,
}

impl TemplatePage {
    /// Create a page from its fields and segments.
    pub fn new(fields: Vec<String>, segments: Vec<String>) -> Self {
        Self { fields, segments }
    }

    /// Whether `segments` has exactly one more entry than `fields`.
    pub fn is_well_formed(&self) -> bool {
        self.segments.len() == self.fields.len() + 1
    }

    /// Literal text expected at the very start of the page.
    pub fn leading(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or("")
    }
}

impl Template {
    /// Create a template from its pages.
    pub fn new(pages: Vec<TemplatePage>) -> Self {
        Self { pages }
    }

    /// Number of pages in the template.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All field names across pages, ignore markers included.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|page| page.fields.iter().map(String::as_str))
    }

    /// Output columns: non-ignored field names in page order, first occurrence kept.
    pub fn schema(&self, ignore_field: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.fields()
            .filter(|field| *field != ignore_field)
            .filter(|field| seen.insert(*field))
            .map(str::to_string)
            .collect()
    }

    /// Shape problems of every page that is not well formed.
    pub fn validate(&self) -> Vec<Diagnostic> {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, page)| !page.is_well_formed())
            .map(|(idx, page)| Diagnostic::FieldCountMismatch {
                page: idx + 1,
                fields: page.fields.len(),
                segments: page.segments.len(),
            })
            .collect()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TemplateError::Parse(e).into())
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let template: Self = serde_json::from_str(json).map_err(TemplateError::Parse)?;
        if template.pages.is_empty() {
            return Err(TemplateError::Empty.into());
        }
        Ok(template)
    }

    /// Load a template previously written with [`Template::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the template as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
