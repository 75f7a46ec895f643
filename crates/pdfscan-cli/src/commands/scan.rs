//! Scan command - extract fields from every PDF in one or more folders.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::{glob, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use pdfscan_core::{BatchScanner, CsvSink, PdfExtractor};

use super::{load_config, load_template, report_diagnostics};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Template PDF or previously saved template (.json)
    #[arg(short, long, required = true)]
    template: PathBuf,

    /// Folders containing PDF files to scan
    #[arg(short, long, num_args = 1..)]
    data: Vec<PathBuf>,

    /// File to write results to (default: pdf_data_out.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Folder to save embedded images to; skipped when not given
    #[arg(short, long)]
    image_output: Option<PathBuf>,

    /// Name for fields to ignore (values that change between PDFs but should not be recorded)
    #[arg(short = 'g', long)]
    ignore: Option<String>,
}

pub fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(ignore) = args.ignore {
        config.matcher.ignore_field = ignore;
    }

    println!("{} Loading template", style("ℹ").blue());
    let loaded = load_template(&args.template, &config)?;
    report_diagnostics(&loaded.diagnostics);

    if loaded.compiled && config.template.save_compiled {
        let saved = args.template.with_extension("json");
        loaded.template.save(&saved)?;
        println!(
            "{} Template data saved to {}",
            style("✓").green(),
            saved.display()
        );
    }

    if args.data.is_empty() {
        return Ok(());
    }

    let files = find_pdfs(&args.data)?;
    println!(
        "{} Found {} PDF files",
        style("ℹ").blue(),
        files.len()
    );

    let output_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.default_output));
    let schema = loaded.template.schema(&config.matcher.ignore_field);
    let mut sink = CsvSink::create(&output_path, &config.output.path_column, schema)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let scanner = BatchScanner::new(&loaded.template, &config).with_image_dir(args.image_output);
    let try_empty_password = config.pdf.try_empty_password;
    let report = scanner.run(
        &files,
        || PdfExtractor::new().with_empty_password(try_empty_password),
        &mut sink,
        |_| pb.inc(1),
    )?;

    pb.finish_and_clear();

    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );
    println!(
        "   {} written, {} partial, {} skipped",
        style(report.processed).green(),
        style(report.partial).yellow(),
        style(report.skipped.len()).red()
    );
    if report.images_written > 0 {
        println!("   {} images saved", report.images_written);
    }

    if !report.skipped.is_empty() {
        println!();
        println!("{}", style("Skipped files:").red());
        for skipped in &report.skipped {
            println!("  - {}: {}", skipped.path.display(), skipped.reason);
        }
    }

    info!("Results written to {}", output_path.display());
    Ok(())
}

/// All `*.pdf` files directly inside each folder, sorted per folder.
fn find_pdfs(dirs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for dir in dirs {
        if !dir.is_dir() {
            anyhow::bail!("Data folder not found: {}", dir.display());
        }

        let pattern = pdf_pattern(dir);
        debug!("Searching {}", pattern);

        let mut found: Vec<PathBuf> = glob(&pattern)?.filter_map(|r| r.ok()).collect();
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

fn pdf_pattern(dir: &Path) -> String {
    let escaped = Pattern::escape(&dir.to_string_lossy());
    format!("{}/*.pdf", escaped.trim_end_matches('/'))
}
