//! Template compiler: splits normalized page text into fields and anchors.

use std::collections::HashMap;

use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::error::TemplateError;
use crate::models::config::{DEFAULT_IGNORE_FIELD, ScanConfig};
use crate::models::template::{Template, TemplatePage};

use super::patterns::PLACEHOLDER;
use super::Result;

/// A compiled template together with the problems found while compiling it.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    pub template: Template,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledTemplate {
    /// Whether any page failed the field/segment count check.
    pub fn is_degraded(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::FieldCountMismatch { .. }))
    }
}

/// Compiles whitespace-normalized template pages.
pub struct TemplateCompiler {
    /// Placeholder name excluded from duplicate checks.
    ignore_field: String,
    /// Fail instead of warning on field names repeated across pages.
    reject_duplicate_fields: bool,
}

impl TemplateCompiler {
    /// Create a compiler with default settings.
    pub fn new() -> Self {
        Self {
            ignore_field: DEFAULT_IGNORE_FIELD.to_string(),
            reject_duplicate_fields: false,
        }
    }

    /// Create a compiler from the scan configuration.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new()
            .with_ignore_field(config.matcher.ignore_field.clone())
            .with_duplicate_rejection(config.template.reject_duplicate_fields)
    }

    /// Set the ignore marker.
    pub fn with_ignore_field(mut self, ignore_field: impl Into<String>) -> Self {
        self.ignore_field = ignore_field.into();
        self
    }

    /// Set whether repeated field names fail compilation.
    pub fn with_duplicate_rejection(mut self, reject: bool) -> Self {
        self.reject_duplicate_fields = reject;
        self
    }

    /// Split one normalized page into its fields and literal segments.
    pub fn compile_page(&self, text: &str) -> TemplatePage {
        let fields = PLACEHOLDER
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect();
        let segments = PLACEHOLDER.split(text).map(str::to_string).collect();

        TemplatePage::new(fields, segments)
    }

    /// Compile every page of a normalized template document.
    ///
    /// Shape problems are reported as diagnostics and never abort
    /// compilation. The only error is a repeated field name when duplicate
    /// rejection is enabled.
    pub fn compile<S: AsRef<str>>(&self, pages: &[S]) -> Result<CompiledTemplate> {
        let mut diagnostics = Vec::new();
        let mut compiled = Vec::with_capacity(pages.len());

        for (idx, text) in pages.iter().enumerate() {
            let page = self.compile_page(text.as_ref());

            if !page.is_well_formed() {
                let diagnostic = Diagnostic::FieldCountMismatch {
                    page: idx + 1,
                    fields: page.fields.len(),
                    segments: page.segments.len(),
                };
                debug!("{}", diagnostic);
                diagnostics.push(diagnostic);
            }

            debug!("Page {}: {} fields", idx + 1, page.fields.len());
            compiled.push(page);
        }

        let template = Template::new(compiled);
        diagnostics.extend(self.check_duplicates(&template)?);

        Ok(CompiledTemplate {
            template,
            diagnostics,
        })
    }

    /// Report field names defined more than once, ignore marker excluded.
    ///
    /// Used on freshly compiled templates and on templates loaded from disk.
    pub fn check_duplicates(&self, template: &Template) -> Result<Vec<Diagnostic>> {
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut diagnostics = Vec::new();

        for (idx, page) in template.pages.iter().enumerate() {
            for field in &page.fields {
                if *field == self.ignore_field {
                    continue;
                }

                let page_number = idx + 1;
                match first_seen.get(field.as_str()) {
                    Some(&first_page) => {
                        if self.reject_duplicate_fields {
                            return Err(TemplateError::DuplicateField {
                                name: field.clone(),
                                first_page,
                                page: page_number,
                            });
                        }
                        let diagnostic = Diagnostic::DuplicateField {
                            name: field.clone(),
                            first_page,
                            page: page_number,
                        };
                        debug!("{}", diagnostic);
                        diagnostics.push(diagnostic);
                    }
                    None => {
                        first_seen.insert(field.as_str(), page_number);
                    }
                }
            }
        }

        Ok(diagnostics)
    }
}

impl Default for TemplateCompiler {
    fn default() -> Self {
        Self::new()
    }
}
