//! Row reconciliation: one calendar event per job row.
//!
//! Each row goes through three steps:
//! - `plan`: decide what to do from the row and the lookup result (pure)
//! - `execute`: create or update the event and reapply reminders
//! - `commit`: write Status and Event ID back to the sheet and flush
//!
//! Rows are committed one at a time, so an interrupted pass leaves every
//! finished row recorded in the sheet. A re-run picks up from there: rows
//! whose id still resolves are updated, the rest are created again.

use crate::constants::HEADER_OFFSET;
use crate::description;
use crate::error::{JobCalError, JobCalResult};
use crate::event::Event;
use crate::reminder::{ReminderPolicy, apply_reminders};
use crate::schema::{ColumnMap, JobRow};
use crate::store::{CalendarStore, Lookup, TableStore};
use crate::table::CellRef;
use crate::window::TimeWindow;

pub const MISSING_NAME_OR_DATE: &str = "Error: Missing Name or Date";

/// Everything the reconciler needs from one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowInput {
    pub title: Option<String>,
    pub window: Option<TimeWindow>,
    pub description: String,
    pub existing_id: Option<String>,
}

impl RowInput {
    pub fn from_row(row: &JobRow<'_>) -> Self {
        RowInput {
            title: row.title(),
            window: TimeWindow::for_delivery(row.delivery()),
            description: description::build(row),
            existing_id: row.event_id(),
        }
    }
}

/// What to do with a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The stored id resolved to this event.
    Update(Event),
    Create { title: String, window: TimeWindow },
    /// Blank row: nothing to do, nothing to record.
    Skip,
    /// Exactly one of title and delivery date is present.
    Reject,
}

/// Decide what to do with a row given the result of resolving its stored id.
pub fn plan(input: &RowInput, lookup: Lookup) -> Action {
    if let Lookup::Found(event) = lookup {
        return Action::Update(event);
    }

    match (&input.title, &input.window) {
        (Some(title), Some(window)) => Action::Create {
            title: title.clone(),
            window: *window,
        },
        (None, None) => Action::Skip,
        _ => Action::Reject,
    }
}

/// Resolve the row's stored id. A row without one resolves to `NotFound`.
pub fn resolve(input: &RowInput, calendar: &mut dyn CalendarStore) -> Lookup {
    match &input.existing_id {
        Some(id) => calendar.lookup(id),
        None => Lookup::NotFound,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Created,
    Updated,
    Skipped,
    Rejected,
    Failed,
}

/// The status and id a row ends up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub kind: OutcomeKind,
    pub status: String,
    pub event_id: Option<String>,
}

impl RowOutcome {
    fn created(event_id: String, policy: &ReminderPolicy) -> Self {
        RowOutcome {
            kind: OutcomeKind::Created,
            status: format!("Created ({})", policy.short_label()),
            event_id: Some(event_id),
        }
    }

    fn updated(event_id: String, policy: &ReminderPolicy) -> Self {
        RowOutcome {
            kind: OutcomeKind::Updated,
            status: format!("Updated ({})", policy.short_label()),
            event_id: Some(event_id),
        }
    }

    fn skipped() -> Self {
        RowOutcome {
            kind: OutcomeKind::Skipped,
            status: String::new(),
            event_id: None,
        }
    }

    fn rejected() -> Self {
        RowOutcome {
            kind: OutcomeKind::Rejected,
            status: MISSING_NAME_OR_DATE.to_string(),
            event_id: None,
        }
    }

    fn failed(error: &JobCalError) -> Self {
        RowOutcome {
            kind: OutcomeKind::Failed,
            status: format!("Error: {}", error),
            event_id: None,
        }
    }
}

/// Carry out an action against the calendar. Calendar errors become a
/// `Failed` outcome; they never escape the row.
pub fn execute(
    action: Action,
    input: &RowInput,
    calendar: &mut dyn CalendarStore,
    policy: &ReminderPolicy,
) -> RowOutcome {
    let result = match action {
        Action::Update(event) => update_event(&event, input, calendar, policy)
            .map(|()| RowOutcome::updated(event.id, policy)),
        Action::Create { title, window } => calendar
            .create_event(&title, &window, &input.description)
            .map(|event| {
                apply_reminders(calendar, &event.id, policy);
                RowOutcome::created(event.id, policy)
            }),
        Action::Skip => Ok(RowOutcome::skipped()),
        Action::Reject => Ok(RowOutcome::rejected()),
    };

    result.unwrap_or_else(|e| RowOutcome::failed(&e))
}

fn update_event(
    event: &Event,
    input: &RowInput,
    calendar: &mut dyn CalendarStore,
    policy: &ReminderPolicy,
) -> JobCalResult<()> {
    calendar.set_title(&event.id, input.title.as_deref().unwrap_or_default())?;
    calendar.set_description(&event.id, &input.description)?;
    if let Some(window) = &input.window {
        calendar.set_time(&event.id, window)?;
    }

    apply_reminders(calendar, &event.id, policy);
    Ok(())
}

/// Reconcile a single row against the calendar.
pub fn reconcile_row(
    row: &JobRow<'_>,
    calendar: &mut dyn CalendarStore,
    policy: &ReminderPolicy,
) -> RowOutcome {
    let input = RowInput::from_row(row);
    let lookup = resolve(&input, calendar);
    let action = plan(&input, lookup);
    execute(action, &input, calendar, policy)
}

/// Write a row's outcome back to the sheet and flush it.
///
/// Rows with an empty status are left untouched. Returns whether anything
/// was written.
pub fn commit(
    table: &mut dyn TableStore,
    columns: &ColumnMap,
    index: usize,
    outcome: &RowOutcome,
) -> JobCalResult<bool> {
    if outcome.status.is_empty() {
        return Ok(false);
    }

    table.write_cell(CellRef::data(index, columns.status), &outcome.status)?;
    if let Some(id) = &outcome.event_id {
        table.write_cell(CellRef::data(index, columns.event_id), id)?;
    }
    table.flush()?;

    Ok(true)
}

/// One row's result within a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    /// 1-based sheet row number
    pub sheet_row: usize,
    pub title: Option<String>,
    pub outcome: RowOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub rejected: usize,
    pub failed: usize,
    pub rows: Vec<RowReport>,
}

impl RunSummary {
    fn record(&mut self, report: RowReport) {
        match report.outcome.kind {
            OutcomeKind::Created => self.created += 1,
            OutcomeKind::Updated => self.updated += 1,
            OutcomeKind::Skipped => self.skipped += 1,
            OutcomeKind::Rejected => self.rejected += 1,
            OutcomeKind::Failed => self.failed += 1,
        }
        self.rows.push(report);
    }
}

/// Runs reconciliation passes with a fixed reminder policy.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    policy: ReminderPolicy,
}

impl Reconciler {
    pub fn new(policy: ReminderPolicy) -> Self {
        Reconciler { policy }
    }

    pub fn policy(&self) -> &ReminderPolicy {
        &self.policy
    }

    /// One sequential pass over every data row.
    ///
    /// Fails before touching any row when the sheet is missing, has no data
    /// rows, or lacks a required column. Row-level problems are recorded in
    /// the row's Status instead.
    pub fn run(
        &self,
        table: &mut dyn TableStore,
        calendar: &mut dyn CalendarStore,
    ) -> JobCalResult<RunSummary> {
        let data = table.read_table()?;
        if data.is_empty() {
            return Err(JobCalError::NoData);
        }
        let columns = ColumnMap::bind(&data.header)?;

        let mut summary = RunSummary::default();

        for index in 0..data.rows.len() {
            let row = columns.row(&data, index);
            let sheet_row = index + HEADER_OFFSET;

            let outcome = reconcile_row(&row, calendar, &self.policy);
            match outcome.kind {
                OutcomeKind::Failed => {
                    tracing::error!(sheet_row, status = %outcome.status, "Row failed")
                }
                kind => tracing::debug!(sheet_row, outcome = ?kind, "Row reconciled"),
            }

            commit(table, &columns, index, &outcome)?;

            summary.record(RowReport {
                sheet_row,
                title: row.title(),
                outcome,
            });
        }

        tracing::info!(
            created = summary.created,
            updated = summary.updated,
            skipped = summary.skipped,
            rejected = summary.rejected,
            failed = summary.failed,
            "Pass complete"
        );

        Ok(summary)
    }
}

/// The "Set Events" action: run a pass and tell the user how it went.
pub fn process_events(
    table: &mut dyn TableStore,
    calendar: &mut dyn CalendarStore,
    policy: ReminderPolicy,
) -> JobCalResult<RunSummary> {
    let reconciler = Reconciler::new(policy);

    match reconciler.run(table, calendar) {
        Ok(summary) => {
            table.alert(&format!(
                "Success! All events updated with {} reminders.",
                reconciler.policy().long_label()
            ));
            Ok(summary)
        }
        Err(e) => {
            let message = match &e {
                JobCalError::SheetNotFound(_) | JobCalError::NoData => format!("Error: {}", e),
                _ => format!("Global Error: {}", e),
            };
            table.alert(&message);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::SheetOp;
    use crate::store::{CalendarOp, MemoryCalendar, MemoryTable};
    use chrono::NaiveDate;

    const HEADER: [&str; 7] = [
        "Client Name",
        "Outfit Type",
        "Date of Assigning",
        "Date of Delivery",
        "Job-Card No.",
        "Status",
        "Event ID",
    ];

    fn sheet(rows: &[[&str; 7]]) -> MemoryTable {
        let mut records = vec![HEADER.to_vec()];
        records.extend(rows.iter().map(|r| r.to_vec()));
        MemoryTable::from_records(records)
    }

    fn jan(day: u32, hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn cell(table: &MemoryTable, row: usize, column: usize) -> String {
        table.table().unwrap().cell(row, column).to_raw()
    }

    const JANE: [&str; 7] = ["Jane Doe", "Lehenga", "2024-01-01", "2024-01-10", "JC-101", "", ""];

    // --- plan ---

    fn input(title: Option<&str>, window: Option<TimeWindow>) -> RowInput {
        RowInput {
            title: title.map(String::from),
            window,
            description: String::new(),
            existing_id: None,
        }
    }

    #[test]
    fn plan_create_needs_title_and_window() {
        let window = TimeWindow::new(jan(10, 11), jan(10, 12));
        assert_eq!(
            plan(&input(Some("Jane"), Some(window)), Lookup::NotFound),
            Action::Create {
                title: "Jane".into(),
                window
            }
        );
        assert_eq!(plan(&input(None, None), Lookup::NotFound), Action::Skip);
        assert_eq!(plan(&input(Some("Jane"), None), Lookup::NotFound), Action::Reject);
        assert_eq!(plan(&input(None, Some(window)), Lookup::NotFound), Action::Reject);
    }

    #[test]
    fn plan_found_event_is_always_updated() {
        let window = TimeWindow::new(jan(10, 11), jan(10, 12));
        let event = Event::new("evt-9".into(), "Old", window, "");
        assert_eq!(
            plan(&input(None, None), Lookup::Found(event.clone())),
            Action::Update(event)
        );
    }

    // --- full pass ---

    #[test]
    fn creates_event_for_new_row() {
        let mut table = sheet(&[JANE]);
        let mut calendar = MemoryCalendar::new();

        let summary = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();
        assert_eq!(summary.created, 1);

        let event = calendar.get("evt-1").expect("event created");
        assert_eq!(event.title, "Jane Doe");
        assert_eq!(event.window, TimeWindow::new(jan(10, 11), jan(10, 12)));
        assert_eq!(
            event.description.as_deref(),
            Some("Outfit: Lehenga\nJob-Card No.: JC-101\nDate Assigned: Mon Jan 01 2024")
        );
        assert_eq!(event.reminder_minutes(), vec![10080, 4320]);

        assert_eq!(cell(&table, 0, 5), "Created (1wk & 3day)");
        assert_eq!(cell(&table, 0, 6), "evt-1");
        assert_eq!(
            table.alerts,
            vec!["Success! All events updated with 1 Week & 3 Day reminders."]
        );
    }

    #[test]
    fn rerun_updates_without_duplicating() {
        let mut table = sheet(&[JANE]);
        let mut calendar = MemoryCalendar::new();
        let policy = ReminderPolicy::default();

        process_events(&mut table, &mut calendar, policy.clone()).unwrap();
        let first = calendar.get("evt-1").unwrap().clone();

        let summary = process_events(&mut table, &mut calendar, policy).unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.created, 0);
        assert_eq!(calendar.len(), 1);

        let second = calendar.get("evt-1").unwrap();
        assert_eq!(second.window, first.window);
        assert_eq!(second.description, first.description);
        assert_eq!(second.reminders.len(), 2);
        assert_eq!(cell(&table, 0, 5), "Updated (1wk & 3day)");
        assert_eq!(cell(&table, 0, 6), "evt-1");
    }

    #[test]
    fn stale_id_recreates_and_overwrites() {
        let mut row = JANE;
        row[6] = "deleted-long-ago";
        let mut table = sheet(&[row]);
        let mut calendar = MemoryCalendar::new();

        let summary = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        assert_eq!(summary.created, 1);
        assert_eq!(calendar.created, 1);
        assert_eq!(cell(&table, 0, 5), "Created (1wk & 3day)");
        assert_eq!(cell(&table, 0, 6), "evt-1");
    }

    #[test]
    fn event_deleted_from_calendar_is_recreated_once() {
        let mut table = sheet(&[JANE]);
        let mut calendar = MemoryCalendar::new();
        let policy = ReminderPolicy::default();

        process_events(&mut table, &mut calendar, policy.clone()).unwrap();
        assert!(calendar.delete("evt-1").is_some());

        let summary = process_events(&mut table, &mut calendar, policy).unwrap();

        assert_eq!(summary.created, 1);
        assert_eq!(summary.updated, 0);
        assert_eq!(calendar.len(), 1);
        assert!(calendar.get("evt-1").is_none());
        assert_eq!(calendar.get("evt-2").unwrap().reminder_minutes(), vec![10080, 4320]);
        assert_eq!(cell(&table, 0, 5), "Created (1wk & 3day)");
        assert_eq!(cell(&table, 0, 6), "evt-2");
    }

    #[test]
    fn update_keeps_window_when_delivery_date_is_gone() {
        let mut table = sheet(&[JANE]);
        let mut calendar = MemoryCalendar::new();
        process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        let mut row = JANE;
        row[3] = "";
        row[6] = "evt-1";
        let mut table = sheet(&[row]);
        process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        assert_eq!(
            calendar.get("evt-1").unwrap().window,
            TimeWindow::new(jan(10, 11), jan(10, 12))
        );
        assert_eq!(cell(&table, 0, 5), "Updated (1wk & 3day)");
    }

    #[test]
    fn update_moves_window_to_new_delivery_date() {
        let mut table = sheet(&[JANE]);
        let mut calendar = MemoryCalendar::new();
        process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        let mut row = JANE;
        row[3] = "2024-01-20 16:30";
        row[6] = "evt-1";
        let mut table = sheet(&[row]);
        process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        assert_eq!(
            calendar.get("evt-1").unwrap().window,
            TimeWindow::new(jan(20, 11), jan(20, 12))
        );
    }

    #[test]
    fn blank_row_is_not_written() {
        let mut table = sheet(&[["", "", "", "", "", "", ""]]);
        let mut calendar = MemoryCalendar::new();

        let summary = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        assert_eq!(summary.skipped, 1);
        assert!(table.writes().is_empty());
        assert_eq!(table.flush_count(), 0);
        assert_eq!(cell(&table, 0, 5), "");
        assert!(calendar.is_empty());
    }

    #[test]
    fn half_filled_rows_are_rejected() {
        let mut table = sheet(&[
            ["Jane Doe", "Lehenga", "", "", "JC-1", "", ""],
            ["", "Saree", "", "2024-01-10", "JC-2", "", ""],
        ]);
        let mut calendar = MemoryCalendar::new();

        let summary = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        assert_eq!(summary.rejected, 2);
        assert_eq!(cell(&table, 0, 5), "Error: Missing Name or Date");
        assert_eq!(cell(&table, 1, 5), "Error: Missing Name or Date");
        assert_eq!(cell(&table, 0, 6), "");
        assert!(calendar.is_empty());
    }

    #[test]
    fn calendar_error_is_recorded_and_pass_continues() {
        let mut table = sheet(&[JANE, ["John Roe", "Kurta", "", "2024-02-02", "JC-2", "", ""]]);
        let mut calendar = MemoryCalendar::new();
        calendar.fail_on(CalendarOp::Create);

        let summary = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        assert_eq!(summary.failed, 2);
        assert_eq!(cell(&table, 0, 5), "Error: Calendar refused to create");
        assert_eq!(cell(&table, 1, 5), "Error: Calendar refused to create");
        assert_eq!(cell(&table, 0, 6), "");
        assert_eq!(table.alerts.len(), 1);
        assert!(table.alerts[0].starts_with("Success!"));
    }

    #[test]
    fn update_error_keeps_existing_id() {
        let mut table = sheet(&[JANE]);
        let mut calendar = MemoryCalendar::new();
        process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        calendar.fail_on(CalendarOp::SetDescription);
        let summary = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(cell(&table, 0, 5), "Error: Calendar refused to set description");
        assert_eq!(cell(&table, 0, 6), "evt-1");
        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn reminder_failure_does_not_fail_row() {
        let mut table = sheet(&[JANE]);
        let mut calendar = MemoryCalendar::new();
        calendar.fail_on(CalendarOp::RemoveReminders);

        let summary = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        assert_eq!(summary.created, 1);
        assert_eq!(cell(&table, 0, 5), "Created (1wk & 3day)");
        assert!(calendar.get("evt-1").unwrap().reminders.is_empty());
    }

    #[test]
    fn each_row_is_flushed_before_the_next() {
        let mut table = sheet(&[JANE, ["John Roe", "Kurta", "", "2024-02-02", "JC-2", "", ""]]);
        let mut calendar = MemoryCalendar::new();

        process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();

        assert_eq!(
            table.ops,
            vec![
                SheetOp::Write(CellRef::new(2, 6), "Created (1wk & 3day)".into()),
                SheetOp::Write(CellRef::new(2, 7), "evt-1".into()),
                SheetOp::Flush,
                SheetOp::Write(CellRef::new(3, 6), "Created (1wk & 3day)".into()),
                SheetOp::Write(CellRef::new(3, 7), "evt-2".into()),
                SheetOp::Flush,
            ]
        );
    }

    #[test]
    fn interrupted_pass_keeps_finished_rows_and_resumes() {
        let john = ["John Roe", "Kurta", "", "2024-02-02", "JC-2", "", ""];
        let mut table = sheet(&[JANE, john]);
        table.fail_writes_after = Some(2);
        let mut calendar = MemoryCalendar::new();

        let err = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap_err();
        assert!(matches!(err, JobCalError::Table(_)));
        assert!(table.alerts[0].starts_with("Global Error:"));
        assert_eq!(cell(&table, 0, 6), "evt-1");
        assert_eq!(cell(&table, 1, 6), "");

        // Second run: first row updates in place, second row is created.
        table.fail_writes_after = None;
        let summary = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.created, 1);
        assert_eq!(cell(&table, 0, 6), "evt-1");
        assert_eq!(cell(&table, 1, 6), "evt-3");
    }

    // --- global failures ---

    #[test]
    fn missing_sheet_alerts_and_aborts() {
        let mut table = MemoryTable::missing();
        let mut calendar = MemoryCalendar::new();

        let err = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap_err();

        assert!(matches!(err, JobCalError::SheetNotFound(_)));
        assert_eq!(table.alerts, vec!["Error: Sheet named 'memory' not found."]);
    }

    #[test]
    fn header_only_sheet_has_no_data() {
        let mut table = sheet(&[]);
        let mut calendar = MemoryCalendar::new();

        let err = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap_err();

        assert!(matches!(err, JobCalError::NoData));
        assert_eq!(table.alerts, vec!["Error: No data found in the sheet."]);
    }

    #[test]
    fn missing_column_aborts_before_any_row() {
        let mut table = MemoryTable::from_records(vec![
            vec!["Client Name", "Outfit Type", "Date of Delivery", "Job-Card No.", "Status", "Event ID"],
            vec!["Jane Doe", "Lehenga", "2024-01-10", "JC-101", "", ""],
        ]);
        let mut calendar = MemoryCalendar::new();

        let err = process_events(&mut table, &mut calendar, ReminderPolicy::default()).unwrap_err();

        assert!(matches!(err, JobCalError::MissingColumn(ref c) if c == "Date of Assigning"));
        assert_eq!(
            table.alerts,
            vec!["Global Error: Column 'Date of Assigning' is missing. Please check exact spelling."]
        );
        assert!(table.writes().is_empty());
        assert!(calendar.is_empty());
    }
}
