//! Record (row) implementation

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::column::{Column, Dialect};
use crate::error::{CsvError, Result};

/// A record (row) of a CSV table
///
/// Writes past the end never fail: the record is first expanded with empty
/// columns so the target index exists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    columns: Vec<Column>,
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Create a record with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Build a record from anything that converts to columns
    pub fn from_values<I, C>(values: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        Self {
            columns: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Append empty columns until the record holds at least `to_size` columns
    pub fn expand(&mut self, to_size: usize) {
        if self.columns.len() < to_size {
            self.columns.resize_with(to_size, Column::empty);
        }
    }

    /// Get the number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if this record has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get a column by index
    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Get a mutable column by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    /// Get the text of a column by index
    pub fn get_text(&self, index: usize) -> Option<Cow<'_, str>> {
        self.columns.get(index).map(Column::text)
    }

    /// Replace the column at `index`, expanding the record to `index + 1` first
    ///
    /// # Returns
    /// The column previously stored at that index (an empty column if the
    /// record had to grow)
    pub fn set<C: Into<Column>>(&mut self, index: usize, column: C) -> Column {
        self.expand(index + 1);
        std::mem::replace(&mut self.columns[index], column.into())
    }

    /// Insert a column at `index`, expanding the record to `index` first
    ///
    /// Columns at and after `index` shift one position to the right.
    pub fn add<C: Into<Column>>(&mut self, index: usize, column: C) {
        self.expand(index);
        self.columns.insert(index, column.into());
    }

    /// Append a column at the end
    pub fn push<C: Into<Column>>(&mut self, column: C) {
        self.columns.push(column.into());
    }

    /// Remove the column at `index`
    ///
    /// # Errors
    /// - `CsvError::IndexOutOfBounds` if the index is out of bounds
    pub fn remove(&mut self, index: usize) -> Result<Column> {
        if index >= self.columns.len() {
            return Err(CsvError::IndexOutOfBounds {
                index,
                len: self.columns.len(),
            });
        }
        Ok(self.columns.remove(index))
    }

    /// Find the index of the first column equal to `column`
    pub fn index_of(&self, column: &Column) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Find the index of the first column whose text equals `text`
    pub fn position_of_text(&self, text: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.text() == text)
    }

    /// Get the columns in `from..to`, clamped to the record length
    pub fn sublist(&self, from: usize, to: usize) -> &[Column] {
        let to = to.min(self.columns.len());
        let from = from.min(to);
        &self.columns[from..to]
    }

    /// Remove all columns
    pub fn clear(&mut self) {
        self.columns.clear();
    }

    /// Get a slice of all columns
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Iterate over columns
    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    /// Iterate over columns mutably
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Column> {
        self.columns.iter_mut()
    }

    /// Collect the text of every column
    pub fn texts(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.text().into_owned()).collect()
    }

    /// Get a column by header name
    ///
    /// # Arguments
    /// - `headers` - Header index built with [`Table::header_index`](crate::Table::header_index)
    /// - `name` - The header name
    pub fn get_by_header(&self, headers: &IndexMap<String, usize>, name: &str) -> Option<&Column> {
        headers.get(name).and_then(|&i| self.columns.get(i))
    }

    /// Encode every column and join them with the separator
    pub fn to_csv_value(&self, dialect: &Dialect) -> String {
        self.to_csv_value_padded(dialect, 0)
    }

    /// Encode the record padded with empty fields up to `size` columns
    ///
    /// A record longer than `size` is emitted whole.
    pub fn to_csv_value_padded(&self, dialect: &Dialect, size: usize) -> String {
        let count = self.columns.len().max(size);
        let mut line = String::new();
        for i in 0..count {
            if i > 0 {
                line.push(dialect.separator);
            }
            if let Some(column) = self.columns.get(i) {
                line.push_str(&column.to_csv_value(dialect));
            }
        }
        line
    }
}

impl FromIterator<Column> for Record {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = Column;
    type IntoIter = std::vec::IntoIter<Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a mut Record {
    type Item = &'a mut Column;
    type IntoIter = std::slice::IterMut<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_set_expands_to_index_plus_one() {
        let mut record = Record::new();
        let previous = record.set(3, "d");
        assert_eq!(record.len(), 4);
        assert!(previous.is_empty());
        assert_eq!(record.get_text(3).as_deref(), Some("d"));
        assert!(record.get(0).is_some_and(Column::is_empty));

        let previous = record.set(3, "e");
        assert_eq!(previous.text(), "d");
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_add_expands_to_index_then_inserts() {
        let mut record = Record::new();
        record.add(2, "c");
        assert_eq!(record.texts(), vec!["", "", "c"]);

        record.add(0, "a");
        assert_eq!(record.texts(), vec!["a", "", "", "c"]);
    }

    #[test]
    fn test_expand_never_shrinks() {
        let mut record = Record::from_values(["a", "b", "c"]);
        record.expand(1);
        assert_eq!(record.len(), 3);
        record.expand(5);
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_list_operations() {
        let mut record = Record::from_values(["a", "b", "c", "b"]);
        assert_eq!(record.index_of(&Column::new("b")), Some(1));
        assert_eq!(record.position_of_text("c"), Some(2));
        assert_eq!(record.index_of(&Column::new("z")), None);
        assert_eq!(record.sublist(1, 3).len(), 2);
        assert_eq!(record.sublist(2, 99).len(), 2);

        let removed = record.remove(0).unwrap();
        assert_eq!(removed.text(), "a");
        assert!(matches!(
            record.remove(10),
            Err(CsvError::IndexOutOfBounds { index: 10, len: 3 })
        ));

        record.clear();
        assert!(record.is_empty());
    }

    #[test]
    fn test_to_csv_value() {
        let mut record = Record::new();
        record.push("a");
        record.push(Column::new(Value::from(5)));
        record.push("x,y");
        record.push(Column::quoted("q"));
        let dialect = Dialect::default();
        assert_eq!(record.to_csv_value(&dialect), "a,5,\"x,y\",\"q\"");
        assert_eq!(record.to_csv_value_padded(&dialect, 6), "a,5,\"x,y\",\"q\",,");
        assert_eq!(record.to_csv_value_padded(&dialect, 2), "a,5,\"x,y\",\"q\"");
    }

    #[test]
    fn test_get_by_header() {
        let mut headers = IndexMap::new();
        headers.insert("id".to_string(), 0);
        headers.insert("name".to_string(), 1);

        let record = Record::from_values(["7", "Tanaka"]);
        assert_eq!(
            record.get_by_header(&headers, "name").map(|c| c.text().into_owned()),
            Some("Tanaka".to_string())
        );
        assert!(record.get_by_header(&headers, "missing").is_none());
    }
}
