use std::path::Path;

use pyo3::prelude::*;
use crate::{load_file, save_file, CsvOptions, Table as RustTable};

fn options_for(charset: Option<&str>) -> PyResult<CsvOptions> {
    match charset {
        Some(label) => CsvOptions::default()
            .with_charset(label)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())),
        None => Ok(CsvOptions::default()),
    }
}

/// A Python wrapper for Table.
#[pyclass(name = "Table")]
pub struct PyTable {
    inner: RustTable,
}

#[pymethods]
impl PyTable {
    /// Load a CSV file. The charset defaults to Shift-JIS.
    #[staticmethod]
    #[pyo3(signature = (path, charset=None))]
    pub fn load(path: &str, charset: Option<&str>) -> PyResult<Self> {
        let options = options_for(charset)?;
        let table = load_file(Path::new(path), &options)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyIOError, _>(e.to_string()))?;

        Ok(PyTable { inner: table })
    }

    /// Create a table from a list of rows.
    #[staticmethod]
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        PyTable {
            inner: RustTable::from_rows(rows),
        }
    }

    /// Write the table to a CSV file, with CRLF line terminators.
    #[pyo3(signature = (path, charset=None))]
    pub fn save(&self, path: &str, charset: Option<&str>) -> PyResult<()> {
        let options = options_for(charset)?;
        save_file(&self.inner, Path::new(path), &options)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyIOError, _>(e.to_string()))?;
        Ok(())
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Get the widest record's column count.
    pub fn max_column_size(&self) -> usize {
        self.inner.max_column_size()
    }

    /// Get all records as lists of strings.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.inner.to_texts()
    }
}

/// A Python module implemented in Rust.
#[pymodule]
fn lib_legacy_csv(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTable>()?;
    Ok(())
}
