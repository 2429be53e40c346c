//! Column binding: resolve header names to positions once, then read rows
//! through typed accessors.

use chrono::NaiveDateTime;

use crate::cell::CellValue;
use crate::error::{JobCalError, JobCalResult};
use crate::table::Table;

pub const CLIENT_NAME: &str = "Client Name";
pub const OUTFIT_TYPE: &str = "Outfit Type";
pub const DATE_OF_ASSIGNING: &str = "Date of Assigning";
pub const DATE_OF_DELIVERY: &str = "Date of Delivery";
pub const JOB_CARD_NO: &str = "Job-Card No.";
pub const STATUS: &str = "Status";
pub const EVENT_ID: &str = "Event ID";
pub const TABLE_NO: &str = "Table No.";

/// Positions of every column the reconciler reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub title: usize,
    pub outfit: usize,
    pub assigned_date: usize,
    pub delivery_date: usize,
    pub job_card: usize,
    pub status: usize,
    pub event_id: usize,
    pub table_no: Option<usize>,
}

impl ColumnMap {
    /// Resolve the header. Fails on the first required column that is absent.
    pub fn bind(header: &[String]) -> JobCalResult<Self> {
        let position = |name: &str| header.iter().position(|h| h == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| JobCalError::MissingColumn(name.to_string()))
        };

        Ok(ColumnMap {
            title: required(CLIENT_NAME)?,
            outfit: required(OUTFIT_TYPE)?,
            assigned_date: required(DATE_OF_ASSIGNING)?,
            delivery_date: required(DATE_OF_DELIVERY)?,
            job_card: required(JOB_CARD_NO)?,
            status: required(STATUS)?,
            event_id: required(EVENT_ID)?,
            table_no: position(TABLE_NO),
        })
    }

    pub fn row<'a>(&'a self, table: &'a Table, index: usize) -> JobRow<'a> {
        JobRow {
            table,
            columns: self,
            index,
        }
    }
}

/// One data row read through a bound `ColumnMap`.
#[derive(Debug, Clone, Copy)]
pub struct JobRow<'a> {
    table: &'a Table,
    columns: &'a ColumnMap,
    index: usize,
}

impl<'a> JobRow<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    fn at(&self, column: usize) -> &'a CellValue {
        self.table.cell(self.index, column)
    }

    pub fn client_name(&self) -> &'a CellValue {
        self.at(self.columns.title)
    }

    /// Event title: the client name, when filled in.
    pub fn title(&self) -> Option<String> {
        self.client_name().as_text()
    }

    pub fn outfit(&self) -> &'a CellValue {
        self.at(self.columns.outfit)
    }

    pub fn job_card(&self) -> &'a CellValue {
        self.at(self.columns.job_card)
    }

    pub fn assigned_date(&self) -> Option<NaiveDateTime> {
        self.at(self.columns.assigned_date).as_date()
    }

    pub fn delivery(&self) -> &'a CellValue {
        self.at(self.columns.delivery_date)
    }

    /// Table number, or `None` when the column is absent or the cell is blank.
    pub fn table_no(&self) -> Option<&'a CellValue> {
        self.columns
            .table_no
            .map(|c| self.at(c))
            .filter(|v| v.is_truthy())
    }

    pub fn status(&self) -> &'a CellValue {
        self.at(self.columns.status)
    }

    pub fn event_id(&self) -> Option<String> {
        self.at(self.columns.event_id).as_text()
    }
}
