//! Compile command - turn a template PDF into a saved JSON template.

use std::path::PathBuf;

use clap::Args;
use console::style;

use super::{is_pdf, load_config, load_template, report_diagnostics};

/// Arguments for the compile command.
#[derive(Args)]
pub struct CompileArgs {
    /// Template PDF with {FIELD} placeholders
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: input path with a .json extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name for fields to ignore
    #[arg(short = 'g', long)]
    ignore: Option<String>,
}

pub fn run(args: CompileArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(ignore) = args.ignore {
        config.matcher.ignore_field = ignore;
    }

    if !is_pdf(&args.input) {
        anyhow::bail!("Template must be a PDF file: {}", args.input.display());
    }

    let loaded = load_template(&args.input, &config)?;
    report_diagnostics(&loaded.diagnostics);

    let output_path = args
        .output
        .unwrap_or_else(|| args.input.with_extension("json"));
    loaded.template.save(&output_path)?;

    for (idx, page) in loaded.template.pages.iter().enumerate() {
        println!(
            "{} Page {}: {}",
            style("ℹ").blue(),
            idx + 1,
            if page.fields.is_empty() {
                "(no fields)".to_string()
            } else {
                page.fields.join(", ")
            }
        );
    }

    println!(
        "{} Template saved to {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}
