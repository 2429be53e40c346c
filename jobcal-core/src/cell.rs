//! Typed sheet cell values.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::DATE_STRING_FORMAT;

/// Date-time layouts a sheet cell may hold.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Date-only layouts (read as midnight).
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// A single cell, as the reconciler sees it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Date(NaiveDateTime),
}

impl CellValue {
    /// Interpret raw cell text. Recognised date layouts become `Date`,
    /// blank input becomes `Empty`, anything else is kept verbatim.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        match parse_date(trimmed) {
            Some(dt) => CellValue::Date(dt),
            None => CellValue::Text(raw.to_string()),
        }
    }

    /// Whether the cell counts as "filled in".
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Date(_) => true,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(dt) => Some(*dt),
            _ => None,
        }
    }

    /// The rendered value, or `None` for falsy cells.
    pub fn as_text(&self) -> Option<String> {
        self.is_truthy().then(|| self.to_string())
    }

    /// Raw form used when writing the cell back to a sheet.
    pub fn to_raw(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Date(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Date(dt) => write!(f, "{}", dt.format(DATE_STRING_FORMAT)),
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
}
