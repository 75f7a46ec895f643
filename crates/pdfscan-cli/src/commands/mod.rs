//! CLI subcommands.

pub mod compile;
pub mod config;
pub mod inspect;
pub mod scan;

use std::path::Path;

use tracing::{debug, warn};

use pdfscan_core::models::config::ScanConfig;
use pdfscan_core::pdf::{load_normalized_pages, PdfExtractor};
use pdfscan_core::{Diagnostic, Template, TemplateCompiler};

/// A template ready for matching, plus how it was obtained.
pub struct LoadedTemplate {
    pub template: Template,
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the template was compiled from a PDF in this run.
    pub compiled: bool,
}

/// Load the config file given on the command line, or the default one if present.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ScanConfig> {
    if let Some(path) = config_path {
        return Ok(ScanConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(ScanConfig::from_file(&default_path)?)
    } else {
        Ok(ScanConfig::default())
    }
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Compile a template PDF, or load a saved JSON template.
pub fn load_template(path: &Path, config: &ScanConfig) -> anyhow::Result<LoadedTemplate> {
    if !path.exists() {
        anyhow::bail!("Template file not found: {}", path.display());
    }

    let compiler = TemplateCompiler::from_config(config);

    if is_pdf(path) {
        let mut extractor =
            PdfExtractor::new().with_empty_password(config.pdf.try_empty_password);
        let pages = load_normalized_pages(&mut extractor, path)?;
        let compiled = compiler.compile(&pages)?;

        Ok(LoadedTemplate {
            template: compiled.template,
            diagnostics: compiled.diagnostics,
            compiled: true,
        })
    } else {
        let template = Template::load(path)?;
        let mut diagnostics = template.validate();
        diagnostics.extend(compiler.check_duplicates(&template)?);

        Ok(LoadedTemplate {
            template,
            diagnostics,
            compiled: false,
        })
    }
}

/// Log template diagnostics as warnings.
pub fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        warn!("{}", diagnostic);
    }
}
