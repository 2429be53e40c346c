//! In-memory sheet and calendar for exercising the reconciler in tests.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::cell::CellValue;
use crate::constants::HEADER_OFFSET;
use crate::error::{JobCalError, JobCalResult};
use crate::event::{Event, Reminder};
use crate::store::{CalendarStore, Lookup, TableStore};
use crate::table::{CellRef, Table};
use crate::window::TimeWindow;

/// Something that happened to a `MemoryTable`, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOp {
    Write(CellRef, String),
    Flush,
}

/// A sheet held in memory. `None` simulates a missing sheet.
#[derive(Debug, Default)]
pub struct MemoryTable {
    table: Option<Table>,
    pub ops: Vec<SheetOp>,
    pub alerts: Vec<String>,
    /// Fail every write after this many have succeeded.
    pub fail_writes_after: Option<usize>,
}

impl MemoryTable {
    pub fn new(table: Table) -> Self {
        MemoryTable {
            table: Some(table),
            ..Default::default()
        }
    }

    pub fn missing() -> Self {
        MemoryTable::default()
    }

    pub fn from_records<I, R, S>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        MemoryTable::new(Table::from_records(records))
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn writes(&self) -> Vec<(CellRef, String)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SheetOp::Write(cell, value) => Some((*cell, value.clone())),
                SheetOp::Flush => None,
            })
            .collect()
    }

    pub fn flush_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == SheetOp::Flush).count()
    }
}

impl TableStore for MemoryTable {
    fn read_table(&mut self) -> JobCalResult<Table> {
        self.table
            .clone()
            .ok_or_else(|| JobCalError::SheetNotFound("memory".to_string()))
    }

    fn write_cell(&mut self, cell: CellRef, value: &str) -> JobCalResult<()> {
        if let Some(limit) = self.fail_writes_after {
            if self.writes().len() >= limit {
                return Err(JobCalError::Table("sheet is read-only".to_string()));
            }
        }

        let table = self
            .table
            .as_mut()
            .ok_or_else(|| JobCalError::SheetNotFound("memory".to_string()))?;

        if cell.row < HEADER_OFFSET || cell.column == 0 {
            return Err(JobCalError::Table(format!("cannot write to {}", cell)));
        }

        let index = cell.row - HEADER_OFFSET;
        let column = cell.column - 1;
        if table.rows.len() <= index {
            table.rows.resize(index + 1, Vec::new());
        }
        let row = &mut table.rows[index];
        if row.len() <= column {
            row.resize(column + 1, CellValue::Empty);
        }
        row[column] = CellValue::parse(value);

        self.ops.push(SheetOp::Write(cell, value.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> JobCalResult<()> {
        self.ops.push(SheetOp::Flush);
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Calendar operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarOp {
    Create,
    SetTitle,
    SetDescription,
    SetTime,
    RemoveReminders,
    AddReminder,
}

impl fmt::Display for CalendarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarOp::Create => "create",
            CalendarOp::SetTitle => "set title",
            CalendarOp::SetDescription => "set description",
            CalendarOp::SetTime => "set time",
            CalendarOp::RemoveReminders => "remove reminders",
            CalendarOp::AddReminder => "add reminder",
        };
        write!(f, "{}", name)
    }
}

/// A calendar held in memory, with sequential ids (`evt-1`, `evt-2`, ...).
#[derive(Debug, Default)]
pub struct MemoryCalendar {
    events: BTreeMap<String, Event>,
    next_id: u64,
    failing: HashSet<CalendarOp>,
    pub created: usize,
}

impl MemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future call of `op` fail.
    pub fn fail_on(&mut self, op: CalendarOp) {
        self.failing.insert(op);
    }

    pub fn insert(&mut self, event: Event) {
        self.events.insert(event.id.clone(), event);
    }

    /// Delete an event behind the sheet's back.
    pub fn delete(&mut self, id: &str) -> Option<Event> {
        self.events.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.get(id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn check(&self, op: CalendarOp) -> JobCalResult<()> {
        if self.failing.contains(&op) {
            return Err(JobCalError::Calendar(format!("Calendar refused to {}", op)));
        }
        Ok(())
    }

    fn event_mut(&mut self, op: CalendarOp, id: &str) -> JobCalResult<&mut Event> {
        self.check(op)?;
        self.events
            .get_mut(id)
            .ok_or_else(|| JobCalError::EventNotFound(id.to_string()))
    }
}

impl CalendarStore for MemoryCalendar {
    fn lookup(&mut self, id: &str) -> Lookup {
        match self.events.get(id) {
            Some(event) => Lookup::Found(event.clone()),
            None => Lookup::NotFound,
        }
    }

    fn create_event(
        &mut self,
        title: &str,
        window: &TimeWindow,
        description: &str,
    ) -> JobCalResult<Event> {
        self.check(CalendarOp::Create)?;

        self.next_id += 1;
        let event = Event::new(format!("evt-{}", self.next_id), title, *window, description);
        self.events.insert(event.id.clone(), event.clone());
        self.created += 1;

        Ok(event)
    }

    fn set_title(&mut self, id: &str, title: &str) -> JobCalResult<()> {
        self.event_mut(CalendarOp::SetTitle, id)?.title = title.to_string();
        Ok(())
    }

    fn set_description(&mut self, id: &str, description: &str) -> JobCalResult<()> {
        self.event_mut(CalendarOp::SetDescription, id)?.description =
            Some(description.to_string());
        Ok(())
    }

    fn set_time(&mut self, id: &str, window: &TimeWindow) -> JobCalResult<()> {
        self.event_mut(CalendarOp::SetTime, id)?.window = *window;
        Ok(())
    }

    fn remove_all_reminders(&mut self, id: &str) -> JobCalResult<()> {
        self.event_mut(CalendarOp::RemoveReminders, id)?.reminders.clear();
        Ok(())
    }

    fn add_popup_reminder(&mut self, id: &str, minutes: i64) -> JobCalResult<()> {
        self.event_mut(CalendarOp::AddReminder, id)?
            .reminders
            .push(Reminder { minutes });
        Ok(())
    }
}
