//! # legacy-csv
//!
//! A Rust library for reading and writing CSV files produced by legacy
//! Japanese systems: Shift-JIS or EUC-JP text, CRLF line terminators,
//! lenient quoting and quoted fields spanning several lines
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lib_legacy_csv::{load_file, save_file, CsvOptions};
//!
//! // Read a Shift-JIS file
//! let mut table = load_file("customers.csv", &CsvOptions::default()).unwrap();
//!
//! // Print some data
//! println!("Records: {}", table.len());
//! let headers = table.header_index();
//! for record in table.iter().skip(1) {
//!     if let Some(name) = record.get_by_header(&headers, "name") {
//!         println!("Name: {}", name.text());
//!     }
//! }
//!
//! // Fill a cell past the end, the record grows as needed
//! table.record_mut(1).set(5, "checked");
//!
//! // Export as UTF-8, every row padded to the same column count
//! save_file(&table, "customers_utf8.csv", &CsvOptions::utf8()).unwrap();
//! ```
//!
//! ## Features
//!
//! - Whole-document parsing and record-by-record streaming
//! - Shift-JIS, EUC-JP and UTF-8 encodings
//! - Rectangular output with a configurable line terminator
//! - Interop with the `csv` crate

pub mod column;
pub mod error;
pub mod interop;
pub mod io;
pub mod parser;
pub mod reader;
pub mod record;
pub mod state;
pub mod table;
pub mod value;
pub mod writer;

#[cfg(feature = "python")]
mod python;

pub use crate::column::{decode, encode, Column, Dialect};
pub use crate::error::{CsvError, Result};
pub use crate::interop::{table_from_csv_reader, write_table_to_csv_writer};
pub use crate::io::{
    load_file, load_reader, load_str, open_reader, save, save_file, CsvOptions, Encoding,
};
pub use crate::parser::parse;
pub use crate::reader::{DecodedLines, IterLines, LineSource, RecordReader};
pub use crate::record::Record;
pub use crate::table::Table;
pub use crate::value::Value;
pub use crate::writer::CsvWriter;
