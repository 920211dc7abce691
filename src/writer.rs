use std::io::Write;

use crate::column::Dialect;
use crate::error::{CsvError, Result};
use crate::io::{CsvOptions, Encoding};
use crate::record::Record;
use crate::table::Table;

/// Writes records to a byte stream in a given charset
///
/// The underlying writer is flushed every `flush_interval` records rather than
/// after each record, and once more at the end of [`CsvWriter::write_table`].
#[derive(Debug)]
pub struct CsvWriter<W: Write> {
    inner: W,
    encoding: Encoding,
    line_terminator: String,
    dialect: Dialect,
    flush_interval: usize,
    records_written: usize,
}

impl<W: Write> CsvWriter<W> {
    /// Create a writer using the charset, line terminator, dialect and flush interval of `options`
    pub fn new(inner: W, options: &CsvOptions) -> Self {
        Self {
            inner,
            encoding: options.encoding,
            line_terminator: options.line_terminator.clone(),
            dialect: options.dialect,
            flush_interval: options.flush_interval,
            records_written: 0,
        }
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Write a single record followed by the line terminator
    ///
    /// # Arguments
    /// - `record` - The record to write
    /// - `pad_to` - Pad the record with empty fields up to this many columns
    ///
    /// # Errors
    /// - `CsvError::Unmappable` if the record holds characters the charset cannot represent
    /// - `CsvError::Io` if the underlying writer fails
    pub fn write_record(&mut self, record: &Record, pad_to: usize) -> Result<()> {
        let mut line = record.to_csv_value_padded(&self.dialect, pad_to);
        line.push_str(&self.line_terminator);

        let bytes = self
            .encoding
            .encode(&line)
            .ok_or_else(|| CsvError::Unmappable {
                encoding: self.encoding.name(),
                line: self.records_written + 1,
            })?;
        self.inner.write_all(&bytes)?;
        self.records_written += 1;

        if self.flush_interval > 0 && self.records_written % self.flush_interval == 0 {
            self.inner.flush()?;
        }
        Ok(())
    }

    /// Write every record of a table, padded to the widest record
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        let max_column_size = table.max_column_size();
        for record in table {
            self.write_record(record, max_column_size)?;
        }
        self.inner.flush()?;
        log::debug!(
            "wrote {} records of {} columns ({})",
            table.len(),
            max_column_size,
            self.encoding.name()
        );
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Get the underlying writer back
    pub fn into_inner(self) -> W {
        self.inner
    }
}
