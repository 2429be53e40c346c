//! Collaborators the reconciler talks to: a sheet and a calendar.
//!
//! Both are injected as trait objects so the reconciliation pass can run
//! against the CSV/ICS backends or the in-memory fakes alike.

pub mod csv_sheet;
pub mod ics_calendar;
pub mod memory;

use crate::error::JobCalResult;
use crate::event::Event;
use crate::table::{CellRef, Table};
use crate::window::TimeWindow;

pub use csv_sheet::CsvSheet;
pub use ics_calendar::IcsCalendar;
pub use memory::{CalendarOp, MemoryCalendar, MemoryTable};

/// The sheet holding job rows.
pub trait TableStore {
    /// Read the header and every data row.
    fn read_table(&mut self) -> JobCalResult<Table>;

    /// Write a single cell. The write may stay pending until `flush`.
    fn write_cell(&mut self, cell: CellRef, value: &str) -> JobCalResult<()>;

    /// Make every pending write durable.
    fn flush(&mut self) -> JobCalResult<()>;

    /// Show a message to whoever triggered the pass.
    fn alert(&mut self, message: &str);
}

/// Result of resolving a stored event id.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Event),
    NotFound,
}

impl Lookup {
    pub fn found(self) -> Option<Event> {
        match self {
            Lookup::Found(event) => Some(event),
            Lookup::NotFound => None,
        }
    }
}

/// The calendar events are created in.
pub trait CalendarStore {
    /// Resolve an event id. Any failure to resolve is `NotFound`.
    fn lookup(&mut self, id: &str) -> Lookup;

    /// Create an event with its description set up front.
    fn create_event(
        &mut self,
        title: &str,
        window: &TimeWindow,
        description: &str,
    ) -> JobCalResult<Event>;

    fn set_title(&mut self, id: &str, title: &str) -> JobCalResult<()>;

    fn set_description(&mut self, id: &str, description: &str) -> JobCalResult<()>;

    fn set_time(&mut self, id: &str, window: &TimeWindow) -> JobCalResult<()>;

    fn remove_all_reminders(&mut self, id: &str) -> JobCalResult<()>;

    fn add_popup_reminder(&mut self, id: &str, minutes: i64) -> JobCalResult<()>;
}
