//! Result sinks for extraction records.

mod csv_sink;

pub use csv_sink::CsvSink;

use crate::error::Result;
use crate::models::extraction::DocumentExtraction;

/// Destination for one record per processed document.
pub trait ResultSink {
    /// Write one document's extracted fields.
    fn write_record(&mut self, record: &DocumentExtraction) -> Result<()>;

    /// Flush any buffered output.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl ResultSink for Vec<DocumentExtraction> {
    fn write_record(&mut self, record: &DocumentExtraction) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}
