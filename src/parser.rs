use crate::column::Dialect;
use crate::state::Scanner;
use crate::table::Table;

/// Parse a whole CSV document held in memory
///
/// Fields are split on the separator and records on LF. Quoted fields may
/// contain separators, line feeds and doubled quotes. CR is kept as ordinary
/// content, so CRLF input leaves a trailing CR in the last field of each line.
///
/// Malformed quoting never fails: whatever was scanned is decoded best-effort.
///
/// A trailing field is only closed if something was buffered for it, and a
/// trailing record is only kept if it has at least one column. Input ending
/// on a line feed therefore produces no extra empty record.
///
/// # Arguments
/// - `source` - The full CSV text
/// - `dialect` - Separator and quote characters
///
/// # Returns
/// The parsed table
pub fn parse(source: &str, dialect: &Dialect) -> Table {
    let mut scanner = Scanner::new(*dialect);
    let mut table = Table::new();
    let mut rest = source;

    while let Some(offset) = scanner.feed(rest) {
        table.push(scanner.take_record());
        rest = &rest[offset..];
    }

    if let Some(record) = scanner.finish() {
        table.push(record);
    }

    log::trace!("parsed {} records", table.len());
    table
}
