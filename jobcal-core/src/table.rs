//! In-memory view of a sheet: a header plus data rows.

use std::fmt;

use crate::cell::CellValue;
use crate::constants::HEADER_OFFSET;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Table { header, rows }
    }

    /// Build a table from raw string records, the first being the header.
    pub fn from_records<I, R, S>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = records.into_iter();

        let header = records
            .next()
            .map(|r| r.into_iter().map(|s| s.as_ref().to_string()).collect())
            .unwrap_or_default();

        let rows = records
            .map(|r| r.into_iter().map(|s| CellValue::parse(s.as_ref())).collect())
            .collect();

        Table { header, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at a data row and column position. Ragged rows read as empty.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }
}

/// A cell address in 1-based sheet coordinates (the header is row 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub fn new(row: usize, column: usize) -> Self {
        CellRef { row, column }
    }

    /// Address of a data row (0-based) at a column position (0-based).
    pub fn data(index: usize, position: usize) -> Self {
        CellRef {
            row: index + HEADER_OFFSET,
            column: position + 1,
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.row, self.column)
    }
}
