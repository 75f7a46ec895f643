//! Configuration structures for the scanning pipeline.

use serde::{Deserialize, Serialize};

/// Default name for placeholders whose values are discarded.
pub const DEFAULT_IGNORE_FIELD: &str = "IGNORE";

/// Main configuration for pdfscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Field matching configuration.
    pub matcher: MatcherConfig,

    /// Template compilation configuration.
    pub template: TemplateConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Result output configuration.
    pub output: OutputConfig,
}

/// Field matcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Placeholder name whose matched text is dropped from results.
    pub ignore_field: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            ignore_field: DEFAULT_IGNORE_FIELD.to_string(),
        }
    }
}

impl MatcherConfig {
    /// Whether `field` is the ignore marker.
    pub fn is_ignored(&self, field: &str) -> bool {
        field == self.ignore_field
    }
}

/// Template compilation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Fail compilation when a field name appears on more than one page.
    pub reject_duplicate_fields: bool,

    /// Save a freshly compiled PDF template next to the source as JSON.
    pub save_compiled: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            reject_duplicate_fields: false,
            save_compiled: true,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Attempt to open encrypted PDFs with an empty user password.
    pub try_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            try_empty_password: true,
        }
    }
}

/// Result output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Name of the column holding the source document path.
    pub path_column: String,

    /// Output file used when none is given on the command line.
    pub default_output: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path_column: "pdf_file_path".to_string(),
            default_output: "pdf_data_out.csv".to_string(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
