use crate::error::ScrapeError;
use crate::model::Record;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Destination for parsed records
pub trait RecordSink {
    fn write_record(&mut self, record: &Record) -> Result<(), ScrapeError>;
}

impl RecordSink for Vec<Record> {
    fn write_record(&mut self, record: &Record) -> Result<(), ScrapeError> {
        self.push(record.clone());
        Ok(())
    }
}

/// Writes one compact JSON object per line
pub struct JsonLinesWriter<W: Write> {
    writer: W,
    written: usize,
}

impl JsonLinesWriter<BufWriter<File>> {
    /// Creates or truncates the file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes buffered lines and hands back the underlying writer
    pub fn finish(mut self) -> Result<W, ScrapeError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordSink for JsonLinesWriter<W> {
    fn write_record(&mut self, record: &Record) -> Result<(), ScrapeError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}
