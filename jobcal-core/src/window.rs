//! Appointment slot derived from a delivery date.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::constants::{SLOT_END_HOUR, SLOT_START_HOUR};

/// Start and end of an event, as floating local times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        TimeWindow { start, end }
    }

    /// The 11:00-12:00 slot on the delivery day, or `None` when the cell
    /// does not hold a date. Any time of day in the cell is ignored.
    pub fn for_delivery(cell: &CellValue) -> Option<Self> {
        let date = cell.as_date()?.date();

        Some(TimeWindow {
            start: date.and_time(NaiveTime::from_hms_opt(SLOT_START_HOUR, 0, 0)?),
            end: date.and_time(NaiveTime::from_hms_opt(SLOT_END_HOUR, 0, 0)?),
        })
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.start.format("%Y-%m-%d"),
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn slot_is_eleven_to_noon() {
        let window = TimeWindow::for_delivery(&CellValue::Date(at(0, 0))).unwrap();
        assert_eq!(window.start, at(11, 0));
        assert_eq!(window.end, at(12, 0));
        assert_eq!(window.to_string(), "2024-01-10 11:00-12:00");
    }

    #[test]
    fn time_of_day_in_source_is_ignored() {
        let window = TimeWindow::for_delivery(&CellValue::Date(at(18, 45))).unwrap();
        assert_eq!(window.start, at(11, 0));
        assert_eq!(window.end, at(12, 0));
    }

    #[test]
    fn non_dates_have_no_window() {
        assert!(TimeWindow::for_delivery(&CellValue::Empty).is_none());
        assert!(TimeWindow::for_delivery(&CellValue::Text("soon".into())).is_none());
    }
}
