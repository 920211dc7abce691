use indexmap::IndexMap;

use crate::column::Dialect;
use crate::error::{CsvError, Result};
use crate::record::Record;

/// The in-memory representation of a whole CSV document
///
/// This is an ordered list of records. Records do not have to share a column
/// count: [`Table::max_column_size`] gives the widest one, and every
/// serialization pads shorter records up to it so the output is rectangular.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Create a table with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Build a table from rows of values
    ///
    /// # Example
    /// ```
    /// use lib_legacy_csv::Table;
    ///
    /// let table = Table::from_rows([vec!["a", "b"], vec!["1", "2"]]);
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn from_rows<I, R, C>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = C>,
        C: Into<crate::column::Column>,
    {
        Self {
            records: rows.into_iter().map(Record::from_values).collect(),
        }
    }

    /// Append empty records until the table holds at least `to_size` records
    pub fn expand(&mut self, to_size: usize) {
        if self.records.len() < to_size {
            self.records.resize_with(to_size, Record::new);
        }
    }

    /// Get the number of records (rows)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the largest column count over all records
    ///
    /// # Returns
    /// The maximum `len()` of the records, or 0 for an empty table
    pub fn max_column_size(&self) -> usize {
        self.records.iter().map(Record::len).max().unwrap_or(0)
    }

    /// Get a record by index
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Get a mutable record by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    /// Get a mutable record, expanding the table so that `index` exists
    pub fn record_mut(&mut self, index: usize) -> &mut Record {
        self.expand(index + 1);
        &mut self.records[index]
    }

    /// Replace the record at `index`, expanding the table to `index + 1` first
    ///
    /// # Returns
    /// The record previously stored at that index
    pub fn set(&mut self, index: usize, record: Record) -> Record {
        self.expand(index + 1);
        std::mem::replace(&mut self.records[index], record)
    }

    /// Insert a record at `index`, expanding the table to `index` first
    pub fn add(&mut self, index: usize, record: Record) {
        self.expand(index);
        self.records.insert(index, record);
    }

    /// Append a record at the end
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove the record at `index`
    ///
    /// # Errors
    /// - `CsvError::IndexOutOfBounds` if the index is out of bounds
    pub fn remove(&mut self, index: usize) -> Result<Record> {
        if index >= self.records.len() {
            return Err(CsvError::IndexOutOfBounds {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    /// Find the index of the first record equal to `record`
    pub fn index_of(&self, record: &Record) -> Option<usize> {
        self.records.iter().position(|r| r == record)
    }

    /// Get the records in `from..to`, clamped to the table length
    pub fn sublist(&self, from: usize, to: usize) -> &[Record] {
        let to = to.min(self.records.len());
        let from = from.min(to);
        &self.records[from..to]
    }

    /// Remove all records
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Get a slice of all records
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Iterate over records mutably
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.records.iter_mut()
    }

    /// Collect the text of every column of every record
    pub fn to_texts(&self) -> Vec<Vec<String>> {
        self.records.iter().map(Record::texts).collect()
    }

    /// Build a header name to column position map from the first record
    ///
    /// The map keeps header order. When a header name appears twice, the
    /// first position wins.
    pub fn header_index(&self) -> IndexMap<String, usize> {
        let mut index = IndexMap::new();
        if let Some(header) = self.records.first() {
            for (i, column) in header.iter().enumerate() {
                index.entry(column.text().into_owned()).or_insert(i);
            }
        }
        index
    }

    /// Serialize the whole table
    ///
    /// Every record is padded to [`Table::max_column_size`] columns and
    /// followed by `line_terminator`.
    pub fn to_csv_value(&self, dialect: &Dialect, line_terminator: &str) -> String {
        let size = self.max_column_size();
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.to_csv_value_padded(dialect, size));
            out.push_str(line_terminator);
        }
        out
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Table {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a mut Table {
    type Item = &'a mut Record;
    type IntoIter = std::slice::IterMut<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_column_size() {
        assert_eq!(Table::new().max_column_size(), 0);

        let table = Table::from_rows([vec!["a", "b"], vec!["1", "2", "3", "4"], vec![]]);
        assert_eq!(table.max_column_size(), 4);
    }

    #[test]
    fn test_rectangular_output() {
        let table = Table::from_rows([vec!["a", "b"], vec!["1", "2", "3", "4"]]);
        let out = table.to_csv_value(&Dialect::default(), "\n");
        assert_eq!(out, "a,b,,\n1,2,3,4\n");
        for line in out.lines() {
            assert_eq!(line.matches(',').count(), 3);
        }
    }

    #[test]
    fn test_set_and_add_expand() {
        let mut table = Table::new();
        table.set(2, Record::from_values(["x"]));
        assert_eq!(table.len(), 3);
        assert!(table.get(0).is_some_and(Record::is_empty));

        table.add(5, Record::from_values(["y"]));
        assert_eq!(table.len(), 6);
        assert_eq!(table.get(5).and_then(|r| r.get_text(0)).as_deref(), Some("y"));

        table.record_mut(7).set(1, "z");
        assert_eq!(table.len(), 8);
        assert_eq!(table.get(7).map(Record::len), Some(2));
    }

    #[test]
    fn test_remove_and_index_of() {
        let mut table = Table::from_rows([vec!["a"], vec!["b"], vec!["c"]]);
        assert_eq!(table.index_of(&Record::from_values(["b"])), Some(1));
        assert_eq!(table.sublist(1, 10).len(), 2);

        let removed = table.remove(1).unwrap();
        assert_eq!(removed.texts(), vec!["b"]);
        assert!(table.remove(5).is_err());
        assert_eq!(table.to_texts(), vec![vec!["a"], vec!["c"]]);
    }

    #[test]
    fn test_header_index() {
        let table = Table::from_rows([vec!["id", "name", "id"], vec!["1", "Sato", "x"]]);
        let headers = table.header_index();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("id"), Some(&0));
        assert_eq!(headers.get_index(1).map(|(k, _)| k.as_str()), Some("name"));

        let row = table.get(1).unwrap();
        assert_eq!(
            row.get_by_header(&headers, "name").map(|c| c.text().into_owned()),
            Some("Sato".to_string())
        );
    }
}
