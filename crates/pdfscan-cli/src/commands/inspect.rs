//! Inspect command - show what a template will extract.

use std::path::PathBuf;

use clap::Args;
use console::style;

use super::{load_config, load_template, report_diagnostics};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Template PDF or saved template (.json)
    #[arg(required = true)]
    template: PathBuf,

    /// Print the template as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let loaded = load_template(&args.template, &config)?;
    report_diagnostics(&loaded.diagnostics);

    if args.json {
        println!("{}", loaded.template.to_json()?);
        return Ok(());
    }

    let ignore = &config.matcher.ignore_field;
    for (idx, page) in loaded.template.pages.iter().enumerate() {
        println!("{}", style(format!("Page {}", idx + 1)).bold());
        println!("  leading: {:?}", page.leading());
        for (field, anchor) in page.fields.iter().zip(page.segments.iter().skip(1)) {
            let name = if field == ignore {
                style(field.as_str()).dim()
            } else {
                style(field.as_str()).cyan()
            };
            println!("  {} -> until {:?}", name, anchor);
        }
    }

    println!();
    println!("Columns: {}", loaded.template.schema(ignore).join(", "));

    Ok(())
}
