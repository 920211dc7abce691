use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::column::Dialect;
use crate::error::{CsvError, Result};
use crate::parser::parse;
use crate::reader::{DecodedLines, RecordReader};
use crate::table::Table;
use crate::writer::CsvWriter;

/// Default number of records written between two flushes of the underlying writer
pub const DEFAULT_FLUSH_INTERVAL: usize = 1000;

/// Options for reading/writing CSV files
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Charset of the file
    pub encoding: Encoding,
    /// Line terminator written after each record
    pub line_terminator: String,
    /// Separator and quote characters
    pub dialect: Dialect,
    /// Append to an existing file instead of truncating it
    pub append: bool,
    /// Number of records written between two flushes
    pub flush_interval: usize,
}

/// String encoding options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Shift-JIS encoding (the Windows-31J variant)
    ShiftJis,
    /// EUC-JP encoding
    EucJp,
    /// UTF-8 encoding
    Utf8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::ShiftJis,
            line_terminator: "\r\n".to_string(),
            dialect: Dialect::default(),
            append: false,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }
}

impl CsvOptions {
    /// Options of the legacy systems: Shift-JIS with CRLF line terminators
    pub fn legacy() -> Self {
        Self::default()
    }

    /// UTF-8 with LF line terminators
    pub fn utf8() -> Self {
        Self {
            encoding: Encoding::Utf8,
            line_terminator: "\n".to_string(),
            ..Self::default()
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the charset from a label such as `"Shift_JIS"`, `"windows-31j"` or `"UTF-8"`
    ///
    /// # Errors
    /// - `CsvError::UnsupportedEncoding` if the label does not name a supported charset
    pub fn with_charset(mut self, label: &str) -> Result<Self> {
        self.encoding = Encoding::for_label(label)?;
        Ok(self)
    }

    pub fn with_line_terminator<S: Into<String>>(mut self, line_terminator: S) -> Self {
        self.line_terminator = line_terminator.into();
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn with_flush_interval(mut self, flush_interval: usize) -> Self {
        self.flush_interval = flush_interval;
        self
    }
}

impl Encoding {
    /// Resolve a charset label
    ///
    /// Labels follow the WHATWG encoding standard, so `"sjis"`, `"MS932"` and
    /// `"windows-31j"` all resolve to [`Encoding::ShiftJis`].
    ///
    /// # Errors
    /// - `CsvError::UnsupportedEncoding` if the label is unknown or names a charset this library does not handle
    pub fn for_label(label: &str) -> Result<Self> {
        let codec = encoding_rs::Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| CsvError::UnsupportedEncoding(label.to_string()))?;

        if codec == encoding_rs::SHIFT_JIS {
            Ok(Encoding::ShiftJis)
        } else if codec == encoding_rs::EUC_JP {
            Ok(Encoding::EucJp)
        } else if codec == encoding_rs::UTF_8 {
            Ok(Encoding::Utf8)
        } else {
            Err(CsvError::UnsupportedEncoding(label.to_string()))
        }
    }

    /// Get the canonical name of this encoding
    pub fn name(&self) -> &'static str {
        self.codec().name()
    }

    fn codec(&self) -> &'static encoding_rs::Encoding {
        match self {
            Encoding::ShiftJis => encoding_rs::SHIFT_JIS,
            Encoding::EucJp => encoding_rs::EUC_JP,
            Encoding::Utf8 => encoding_rs::UTF_8,
        }
    }

    /// Decode bytes into a string
    ///
    /// Malformed sequences are replaced with U+FFFD. A leading byte order mark
    /// of this encoding is removed.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (decoded, had_errors) = self.codec().decode_with_bom_removal(bytes);
        if had_errors {
            log::warn!("malformed {} input replaced during decoding", self.name());
        }
        decoded.into_owned()
    }

    /// Encode a string into bytes
    ///
    /// # Returns
    /// `None` if the text contains characters this encoding cannot represent
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        if *self == Encoding::Utf8 {
            return Some(text.as_bytes().to_vec());
        }
        let (encoded, _, had_errors) = self.codec().encode(text);
        (!had_errors).then(|| encoded.into_owned())
    }
}

/// Parse a CSV document held in a string, with the default dialect
pub fn load_str(source: &str) -> Table {
    parse(source, &Dialect::default())
}

/// Read a whole CSV document from a byte stream
///
/// The stream is read to the end, decoded with the charset of `options` and
/// parsed in one pass.
///
/// # Arguments
/// - `reader` - The byte stream to read
/// - `options` - Charset and dialect to use
///
/// # Returns
/// The parsed table, or an error if reading fails
pub fn load_reader<R: Read>(mut reader: R, options: &CsvOptions) -> Result<Table> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    let text = options.encoding.decode(&data);
    let table = parse(&text, &options.dialect);
    log::debug!(
        "loaded {} records ({} bytes, {})",
        table.len(),
        data.len(),
        options.encoding.name()
    );
    Ok(table)
}

/// Read a whole CSV file
///
/// # Arguments
/// - `path` - The path to the CSV file to read
/// - `options` - Charset and dialect to use
///
/// # Returns
/// The parsed table, or an error if the file cannot be read
pub fn load_file<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Table> {
    let file = File::open(path)?;
    load_reader(BufReader::new(file), options)
}

/// Open a CSV file for reading one record at a time
pub fn open_reader<P: AsRef<Path>>(
    path: P,
    options: &CsvOptions,
) -> Result<RecordReader<DecodedLines<BufReader<File>>>> {
    let file = File::open(path)?;
    Ok(RecordReader::new(BufReader::new(file), options))
}

/// Write a table to a byte stream
///
/// Every record is padded to the widest record of the table.
///
/// # Arguments
/// - `table` - The table to write
/// - `writer` - The destination stream
/// - `options` - Charset, line terminator, dialect and flush interval
pub fn save<W: Write>(table: &Table, writer: W, options: &CsvOptions) -> Result<()> {
    let mut csv_writer = CsvWriter::new(writer, options);
    csv_writer.write_table(table)?;
    Ok(())
}

/// Write a table to a file
///
/// The file is created if needed. With `options.append` set, records are
/// appended to the existing content; otherwise the file is truncated.
///
/// # Arguments
/// - `table` - The table to write
/// - `path` - The path to the CSV file to write
/// - `options` - Charset, line terminator, dialect, append mode and flush interval
///
/// # Returns
/// Ok(()) if the table was written, or an error if the file could not be written
pub fn save_file<P: AsRef<Path>>(table: &Table, path: P, options: &CsvOptions) -> Result<()> {
    let path = path.as_ref();
    let file = if options.append {
        OpenOptions::new().create(true).append(true).open(path)?
    } else {
        File::create(path)?
    };
    save(table, BufWriter::new(file), options)?;
    log::debug!("saved {} records to {}", table.len(), path.display());
    Ok(())
}
