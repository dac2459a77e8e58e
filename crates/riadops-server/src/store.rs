//! Read-only tabular store.
//!
//! The business keeps its records in spreadsheets. Each sheet is exported as
//! `<dir>/<table>.csv`, the first record being the header row. Cells are
//! addressed by header name, never by position.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{ServerError, ServerResult};

/// Normalizes a header name for lookups: trimmed and lowercased.
fn header_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One data row, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    /// Builds a row from header/value pairs.
    ///
    /// When a header appears twice, the first cell wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut cells = HashMap::new();
        for (header, value) in pairs {
            cells
                .entry(header_key(header.as_ref()))
                .or_insert_with(|| value.into());
        }
        Self { cells }
    }

    fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        Self::from_pairs(headers.iter().zip(record.iter()))
    }

    /// Returns the cell under `column`, matched case-insensitively.
    ///
    /// Rows shorter than the header have no value for the trailing columns.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(&header_key(column)).map(String::as_str)
    }

    /// Returns the cell under `column`, treating blank cells as missing.
    pub fn get_non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// All rows of a named table, plus its header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Returns true if the header row contains `column`.
    pub fn has_column(&self, column: &str) -> bool {
        let key = header_key(column);
        self.headers.iter().any(|h| header_key(h) == key)
    }
}

/// Source of tabular data.
pub trait TableStore: Send + Sync {
    /// Reads every row of the table called `name`.
    fn read_table(&self, name: &str) -> ServerResult<Table>;
}

/// A [`TableStore`] over a directory of CSV exports.
#[derive(Debug, Clone)]
pub struct CsvTableStore {
    dir: PathBuf,
}

impl CsvTableStore {
    /// Creates a store reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing table `name`.
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.csv"))
    }
}

impl TableStore for CsvTableStore {
    fn read_table(&self, name: &str) -> ServerResult<Table> {
        let path = self.table_path(name);
        if !path.is_file() {
            return Err(ServerError::store(
                name,
                format!("no such table file: {}", path.display()),
            ));
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_path(&path)?;

        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(Row::from_record(&headers, &record?));
        }

        debug!(table = name, rows = rows.len(), "Read table");

        Ok(Table {
            name: name.to_string(),
            headers: headers.iter().map(str::to_string).collect(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn row_lookup_is_case_insensitive() {
        let row = Row::from_pairs([(" Room ID ", "r1"), ("iCal URL", "")]);
        assert_eq!(row.get("room id"), Some("r1"));
        assert_eq!(row.get("ROOM ID"), Some("r1"));
        assert_eq!(row.get("ical url"), Some(""));
        assert_eq!(row.get_non_empty("iCal URL"), None);
        assert_eq!(row.get("Guests"), None);
    }

    #[test]
    fn duplicate_headers_keep_first_cell() {
        let row = Row::from_pairs([("Notes", "first"), ("notes", "second")]);
        assert_eq!(row.get("Notes"), Some("first"));
    }

    #[test]
    fn reads_csv_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Rooms.csv"),
            "Room ID,Room Name,Property,iCal URL\n\
             r1, Jasmine ,Riad Nour,https://a.test/r1.ics\n\
             r2,Saffron,Riad Nour\n",
        )
        .unwrap();

        let store = CsvTableStore::new(dir.path());
        let table = store.read_table("Rooms").unwrap();

        assert_eq!(table.name, "Rooms");
        assert_eq!(table.headers.len(), 4);
        assert!(table.has_column("ical url"));
        assert!(!table.has_column("Guests"));

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Room Name"), Some("Jasmine"));
        assert_eq!(table.rows[1].get("iCal URL"), None);
    }

    #[test]
    fn missing_table_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvTableStore::new(dir.path());

        let err = store.read_table("Rooms").unwrap_err();
        assert!(matches!(err, ServerError::Store { ref table, .. } if table == "Rooms"));
    }
}
