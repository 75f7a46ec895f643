//! CSV output with a fixed column schema.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::ResultSink;
use crate::error::Result;
use crate::models::extraction::DocumentExtraction;

/// Writes one CSV row per document: the source path followed by the
/// template's output schema. Fields the matcher did not populate are empty.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    schema: Vec<String>,
}

impl CsvSink<File> {
    /// Create a CSV file at `path` and write its header.
    pub fn create(path: &Path, path_column: &str, schema: Vec<String>) -> Result<Self> {
        Self::new(File::create(path)?, path_column, schema)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap a writer and write the header row.
    pub fn new(inner: W, path_column: &str, schema: Vec<String>) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);

        let mut header = Vec::with_capacity(schema.len() + 1);
        header.push(path_column);
        header.extend(schema.iter().map(String::as_str));
        writer.write_record(&header)?;

        Ok(Self { writer, schema })
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn write_record(&mut self, record: &DocumentExtraction) -> Result<()> {
        let mut row = Vec::with_capacity(self.schema.len() + 1);
        row.push(record.source.as_str());
        row.extend(
            self.schema
                .iter()
                .map(|field| record.get(field).unwrap_or_default()),
        );
        self.writer.write_record(&row)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
