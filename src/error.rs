use thiserror::Error;

/// Result type alias for CSV operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors that can occur while reading or writing CSV data
#[derive(Error, Debug)]
pub enum CsvError {
    /// A raw line feed was found outside a quoted field in the middle of a physical line
    #[error("Unexpected line feed outside a quoted field at line {line}, offset {offset}")]
    UnexpectedNewline { line: usize, offset: usize },

    /// The charset label does not name a supported encoding
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Text contains characters the target charset cannot represent
    #[error("Text on output line {line} cannot be represented in {encoding}")]
    Unmappable { encoding: &'static str, line: usize },

    /// Index out of bounds on removal
    #[error("Index out of bounds: {index} (len: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Error raised by the `csv` crate during interop
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        CsvError::Csv(err.to_string())
    }
}
