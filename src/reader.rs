//! Streaming record reader

use std::io::BufRead;

use crate::column::Dialect;
use crate::error::{CsvError, Result};
use crate::io::{CsvOptions, Encoding};
use crate::record::Record;
use crate::state::{QuoteState, Scanner};

/// A source of physical lines, without their line terminators
pub trait LineSource {
    /// Read the next physical line
    ///
    /// # Returns
    /// `Ok(None)` at end of stream
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Lines read from a byte stream and decoded with a charset
///
/// Lines are split on LF. One trailing CR is dropped, so both LF and CRLF
/// terminated input work.
#[derive(Debug)]
pub struct DecodedLines<R> {
    inner: R,
    encoding: Encoding,
    buf: Vec<u8>,
}

impl<R: BufRead> DecodedLines<R> {
    pub fn new(inner: R, encoding: Encoding) -> Self {
        Self {
            inner,
            encoding,
            buf: Vec::new(),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> LineSource for DecodedLines<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        // LF never appears as a trail byte in the supported charsets
        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(self.encoding.decode(&self.buf)))
    }
}

/// Lines taken from an iterator of already decoded strings
#[derive(Debug)]
pub struct IterLines<I>(pub I);

impl<I: Iterator<Item = String>> LineSource for IterLines<I> {
    fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.0.next())
    }
}

/// Reads one record per call from a line source
///
/// A quoted field may span several physical lines: while the quote is still
/// open at the end of a line, the next line is joined with a line feed and
/// scanning carries on.
///
/// # Example
/// ```
/// use lib_legacy_csv::{Dialect, RecordReader};
///
/// let lines = ["a,\"b", "c\",d"].map(String::from);
/// let mut reader = RecordReader::from_lines(lines.into_iter(), Dialect::default());
/// let record = reader.read_record().unwrap().unwrap();
/// assert_eq!(record.texts(), vec!["a", "b\nc", "d"]);
/// assert!(reader.read_record().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct RecordReader<L> {
    source: L,
    dialect: Dialect,
    line_number: usize,
}

impl<R: BufRead> RecordReader<DecodedLines<R>> {
    /// Create a reader over a byte stream, decoded with the charset of `options`
    pub fn new(reader: R, options: &CsvOptions) -> Self {
        Self::with_source(DecodedLines::new(reader, options.encoding), options.dialect)
    }
}

impl<I: Iterator<Item = String>> RecordReader<IterLines<I>> {
    /// Create a reader over already decoded lines
    pub fn from_lines(lines: I, dialect: Dialect) -> Self {
        Self::with_source(IterLines(lines), dialect)
    }
}

impl<L: LineSource> RecordReader<L> {
    /// Create a reader over any line source
    pub fn with_source(source: L, dialect: Dialect) -> Self {
        Self {
            source,
            dialect,
            line_number: 0,
        }
    }

    /// Number of physical lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn into_inner(self) -> L {
        self.source
    }

    /// Read the next record
    ///
    /// # Errors
    /// - `CsvError::UnexpectedNewline` if a physical line holds a raw line feed
    ///   outside a quoted field
    /// - `CsvError::Io` if the underlying reader fails
    ///
    /// # Returns
    /// `Ok(None)` at end of stream. If the stream ends inside a quoted field,
    /// the record built so far is returned with that field closed as is.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        let Some(mut line) = self.source.next_line()? else {
            return Ok(None);
        };
        self.line_number += 1;

        let mut scanner = Scanner::new(self.dialect);
        let mut lead = 0;

        loop {
            if let Some(offset) = scanner.feed(&line) {
                return Err(CsvError::UnexpectedNewline {
                    line: self.line_number,
                    offset: offset - 1 - lead,
                });
            }

            if scanner.state() == QuoteState::Unquoted {
                break;
            }

            match self.source.next_line()? {
                Some(next) => {
                    self.line_number += 1;
                    log::trace!("quoted field continues on line {}", self.line_number);
                    line.clear();
                    line.push('\n');
                    line.push_str(&next);
                    lead = 1;
                }
                None => {
                    log::debug!(
                        "end of stream inside a quoted field (line {})",
                        self.line_number
                    );
                    break;
                }
            }
        }

        scanner.close_field();
        Ok(Some(scanner.take_record()))
    }
}

impl<L: LineSource> Iterator for RecordReader<L> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn lines_reader(lines: &[&str]) -> RecordReader<IterLines<std::vec::IntoIter<String>>> {
        let owned: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        RecordReader::from_lines(owned.into_iter(), Dialect::default())
    }

    fn read_all<L: LineSource>(reader: RecordReader<L>) -> Vec<Vec<String>> {
        reader
            .map(|r| r.map(|record| record.texts()))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_one_record_per_line() {
        let reader = lines_reader(&["a,b,c", "1,2,3"]);
        assert_eq!(read_all(reader), vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_final_empty_field_is_closed() {
        let reader = lines_reader(&["a,", ""]);
        assert_eq!(read_all(reader), vec![vec!["a", ""], vec![""]]);
    }

    #[test]
    fn test_quoted_field_spans_lines() {
        let mut reader = lines_reader(&["x,\"first", "second", "third\",y", "z"]);
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.texts(), vec!["x", "first\nsecond\nthird", "y"]);
        assert_eq!(reader.line_number(), 3);

        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.texts(), vec!["z"]);
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_end_of_stream_inside_quotes() {
        let mut reader = lines_reader(&["a,\"never closed", "more"]);
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.texts(), vec!["a", "\"never closed\nmore"]);
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_raw_newline_outside_quotes_is_an_error() {
        let mut reader = lines_reader(&["ok", "a,b\nc", "after"]);
        assert!(reader.read_record().unwrap().is_some());
        match reader.read_record() {
            Err(CsvError::UnexpectedNewline { line, offset }) => {
                assert_eq!(line, 2);
                assert_eq!(offset, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        // The reader moves on to the next line
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.texts(), vec!["after"]);
    }

    #[test]
    fn test_newline_inside_quotes_on_one_line_is_allowed() {
        let reader = lines_reader(&["\"a\nb\",c"]);
        assert_eq!(read_all(reader), vec![vec!["a\nb", "c"]]);
    }

    #[test]
    fn test_decoded_lines_utf8_crlf() {
        let data = "a,b\r\n\"c\r\nd\",e\r\n";
        let reader = RecordReader::new(Cursor::new(data.as_bytes()), &CsvOptions::utf8());
        // The CR of the joined physical line is dropped with its terminator
        assert_eq!(read_all(reader), vec![vec!["a", "b"], vec!["c\nd", "e"]]);
    }

    #[test]
    fn test_decoded_lines_shift_jis() {
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode("名前,\"東京\r\n大阪\"\r\n");
        let reader = RecordReader::new(Cursor::new(bytes.into_owned()), &CsvOptions::default());
        assert_eq!(read_all(reader), vec![vec!["名前", "東京\n大阪"]]);
    }
}
