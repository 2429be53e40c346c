//! Event description text for a job row.

use crate::constants::DATE_STRING_FORMAT;
use crate::schema::JobRow;

/// Build the description. Line order and labels are fixed:
/// outfit, job card, then the assigned date and table number when present.
pub fn build(row: &JobRow<'_>) -> String {
    let mut lines = vec![
        format!("Outfit: {}", row.outfit()),
        format!("Job-Card No.: {}", row.job_card()),
    ];

    if let Some(assigned) = row.assigned_date() {
        lines.push(format!("Date Assigned: {}", assigned.format(DATE_STRING_FORMAT)));
    }

    if let Some(table_no) = row.table_no() {
        lines.push(format!("Table No.: {}", table_no));
    }

    lines.join("\n")
}
