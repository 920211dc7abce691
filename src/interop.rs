//! Conversions between [`Table`] and the `csv` crate

use std::io::{Read, Write};

use crate::error::Result;
use crate::record::Record;
use crate::table::Table;

/// Read every record of a `csv::Reader` into a table
///
/// The reader should be built with `has_headers(false)` if the header row is
/// wanted as the first record, and with `flexible(true)` if rows may have
/// different lengths.
///
/// # Example
/// ```
/// use lib_legacy_csv::table_from_csv_reader;
///
/// let data = "a,b\n1,2,3\n";
/// let reader = csv::ReaderBuilder::new()
///     .has_headers(false)
///     .flexible(true)
///     .from_reader(data.as_bytes());
/// let table = table_from_csv_reader(reader).unwrap();
/// assert_eq!(table.max_column_size(), 3);
/// ```
pub fn table_from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Table> {
    let mut table = Table::new();
    for result in reader.records() {
        let string_record = result?;
        table.push(Record::from_values(string_record.iter()));
    }
    Ok(table)
}

/// Write a table through a `csv::Writer`, padding every row to the widest record
///
/// Quoting and escaping are left to the `csv` writer configuration.
pub fn write_table_to_csv_writer<W: Write>(table: &Table, writer: &mut csv::Writer<W>) -> Result<()> {
    let size = table.max_column_size();
    for record in table {
        let mut values = record.texts();
        values.resize(size, String::new());
        writer.write_record(&values)?;
    }
    writer.flush()?;
    Ok(())
}
