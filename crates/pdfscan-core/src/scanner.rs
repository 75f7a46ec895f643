//! Batch scanning: match many documents against one template.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, ScanError};
use crate::models::config::ScanConfig;
use crate::models::extraction::DocumentExtraction;
use crate::models::template::Template;
use crate::output::ResultSink;
use crate::pdf::{dump_images, load_normalized_pages, PdfProcessor};
use crate::template::FieldMatcher;

/// A document that could not be opened or read.
#[derive(Debug, Clone)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Documents that produced a record.
    pub processed: usize,
    /// Processed documents where some page did not match completely.
    pub partial: usize,
    /// Documents that could not be read at all.
    pub skipped: Vec<SkippedDocument>,
    /// Images written to the image output directory.
    pub images_written: usize,
}

/// Scans documents against a read-only template.
pub struct BatchScanner<'a> {
    template: &'a Template,
    matcher: FieldMatcher,
    image_dir: Option<PathBuf>,
}

impl<'a> BatchScanner<'a> {
    /// Create a scanner using the matcher settings from `config`.
    pub fn new(template: &'a Template, config: &ScanConfig) -> Self {
        Self {
            template,
            matcher: FieldMatcher::new(config.matcher.clone()),
            image_dir: None,
        }
    }

    /// Also save each document's embedded images under `dir`.
    pub fn with_image_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.image_dir = dir;
        self
    }

    /// Read, normalize and match a single document.
    ///
    /// Errors mean the document is unreadable. Anchor failures are reported
    /// through the returned diagnostics instead.
    pub fn scan_document<P: PdfProcessor + ?Sized>(
        &self,
        processor: &mut P,
        path: &Path,
    ) -> Result<(DocumentExtraction, usize)> {
        let pages = load_normalized_pages(processor, path)?;
        let source = path.display().to_string();

        let extraction = self.matcher.match_document(self.template, &pages, &source);
        for diagnostic in &extraction.diagnostics {
            warn!("{}", diagnostic);
        }

        let images_written = match &self.image_dir {
            Some(dir) => {
                match dump_images(&*processor, &dir.join(image_subdir(path))) {
                    Ok(count) => count,
                    Err(e) => {
                        warn!("Failed to save images for {}: {}", source, e);
                        0
                    }
                }
            }
            None => 0,
        };

        Ok((extraction, images_written))
    }

    /// Scan every path in order, writing one record per readable document.
    ///
    /// Unreadable documents are skipped and listed in the report; only sink
    /// failures abort the run. `on_document` is called after each path.
    pub fn run<P, F, S>(
        &self,
        paths: &[PathBuf],
        mut new_processor: F,
        sink: &mut S,
        mut on_document: impl FnMut(&Path),
    ) -> Result<BatchReport>
    where
        P: PdfProcessor,
        F: FnMut() -> P,
        S: ResultSink + ?Sized,
    {
        let mut report = BatchReport::default();

        for path in paths {
            info!("Processing {}", path.display());
            let mut processor = new_processor();

            match self.scan_document(&mut processor, path) {
                Ok((extraction, images)) => {
                    sink.write_record(&extraction)?;
                    report.processed += 1;
                    report.images_written += images;
                    if !extraction.is_complete() {
                        report.partial += 1;
                    }
                }
                Err(e) => {
                    let reason = skip_reason(&e);
                    warn!("Skipping {}: {}", path.display(), reason);
                    report.skipped.push(SkippedDocument {
                        path: path.clone(),
                        reason,
                    });
                }
            }

            on_document(path);
        }

        sink.finish()?;
        debug!(
            "Batch finished: {} processed, {} skipped",
            report.processed,
            report.skipped.len()
        );
        Ok(report)
    }
}

/// The document path without its extension, kept relative so it nests
/// under the image directory. Folders stay part of it so that equally named
/// documents from different folders do not share a directory.
fn image_subdir(path: &Path) -> PathBuf {
    path.with_extension("")
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

fn skip_reason(error: &ScanError) -> String {
    match error {
        ScanError::Io(e) if e.kind() == ErrorKind::NotFound => "file not found".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::template::TemplateCompiler;
    use image::DynamicImage;
    use pretty_assertions::assert_eq;

    /// Treats file bytes as UTF-8 text with form feeds between pages.
    #[derive(Default)]
    struct TextPdf {
        pages: Vec<String>,
    }

    impl PdfProcessor for TextPdf {
        fn load(&mut self, data: &[u8]) -> crate::pdf::Result<()> {
            let text = std::str::from_utf8(data).map_err(|e| PdfError::Parse(e.to_string()))?;
            if !text.starts_with("%FAKE") {
                return Err(PdfError::Parse("missing header".to_string()));
            }
            self.pages = text["%FAKE".len()..].split('\x0c').map(str::to_string).collect();
            Ok(())
        }

        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn extract_page_texts(&self) -> crate::pdf::Result<Vec<String>> {
            Ok(self.pages.clone())
        }

        fn extract_images(&self, _page: u32) -> crate::pdf::Result<Vec<DynamicImage>> {
            Ok(Vec::new())
        }
    }

    /// Like `TextPdf`, but every page carries one 1x1 image.
    #[derive(Default)]
    struct ImagePdf(TextPdf);

    impl PdfProcessor for ImagePdf {
        fn load(&mut self, data: &[u8]) -> crate::pdf::Result<()> {
            self.0.load(data)
        }

        fn page_count(&self) -> u32 {
            self.0.page_count()
        }

        fn extract_page_texts(&self) -> crate::pdf::Result<Vec<String>> {
            self.0.extract_page_texts()
        }

        fn extract_images(&self, _page: u32) -> crate::pdf::Result<Vec<DynamicImage>> {
            Ok(vec![DynamicImage::new_rgb8(1, 1)])
        }
    }

    fn template() -> Template {
        TemplateCompiler::new()
            .compile(&["Name:{NAME}Date:{DATE}", "Total:{TOTAL}EUR"])
            .unwrap()
            .template
    }

    #[test]
    fn test_unreadable_document_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.pdf");
        let broken = dir.path().join("broken.pdf");
        let missing = dir.path().join("missing.pdf");
        std::fs::write(&good, "%FAKEName: John\nDate: 2024-01-01\x0cTotal: 12.50 EUR").unwrap();
        std::fs::write(&broken, "garbage").unwrap();

        let template = template();
        let scanner = BatchScanner::new(&template, &ScanConfig::default());
        let mut records: Vec<DocumentExtraction> = Vec::new();
        let mut seen = Vec::new();

        let report = scanner
            .run(
                &[broken.clone(), good.clone(), missing.clone()],
                TextPdf::default,
                &mut records,
                |path| seen.push(path.to_path_buf()),
            )
            .unwrap();

        assert_eq!(report.processed, 1);
        assert_eq!(report.partial, 0);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].path, broken);
        assert_eq!(report.skipped[1].reason, "file not found");
        assert_eq!(seen, vec![broken, good.clone(), missing]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, good.display().to_string());
        assert_eq!(records[0].get("NAME"), Some("John"));
        assert_eq!(records[0].get("DATE"), Some("2024-01-01"));
        assert_eq!(records[0].get("TOTAL"), Some("12.50"));
    }

    #[test]
    fn test_partial_documents_still_produce_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.pdf");
        std::fs::write(&path, "%FAKEName: Jane\nWhen: soon\x0cTotal: 3 EUR").unwrap();

        let template = template();
        let scanner = BatchScanner::new(&template, &ScanConfig::default());
        let mut records: Vec<DocumentExtraction> = Vec::new();

        let report = scanner
            .run(&[path], TextPdf::default, &mut records, |_| {})
            .unwrap();

        assert_eq!(report.processed, 1);
        assert_eq!(report.partial, 1);
        assert_eq!(records[0].get("NAME"), None);
        assert_eq!(records[0].get("TOTAL"), Some("3"));
        assert_eq!(records[0].diagnostics.len(), 1);
    }

    #[test]
    fn test_image_subdir_keeps_folders() {
        assert_eq!(
            image_subdir(Path::new("jan/report.pdf")),
            PathBuf::from("jan/report")
        );
        assert_eq!(
            image_subdir(Path::new("/data/feb/report.pdf")),
            PathBuf::from("data/feb/report")
        );
        assert_eq!(
            image_subdir(Path::new("./report.v2.pdf")),
            PathBuf::from("report.v2")
        );
    }

    #[test]
    fn test_same_named_documents_keep_separate_images() {
        let data = tempfile::tempdir().unwrap();
        let images = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for month in ["jan", "feb"] {
            let folder = data.path().join(month);
            std::fs::create_dir(&folder).unwrap();
            let path = folder.join("report.pdf");
            std::fs::write(&path, "%FAKEName: A Date: B\x0cTotal: 1 EUR").unwrap();
            paths.push(path);
        }

        let template = template();
        let scanner = BatchScanner::new(&template, &ScanConfig::default())
            .with_image_dir(Some(images.path().to_path_buf()));
        let mut records: Vec<DocumentExtraction> = Vec::new();

        let report = scanner
            .run(&paths, ImagePdf::default, &mut records, |_| {})
            .unwrap();

        assert_eq!(report.images_written, 4);
        for path in &paths {
            let dir = images.path().join(image_subdir(path));
            assert!(dir.join("page_0_image_0.png").is_file());
            assert!(dir.join("page_1_image_0.png").is_file());
        }
    }
}
