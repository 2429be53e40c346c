//! ICS file parsing using the icalendar crate's parser.

use crate::event::{Event, Reminder};
use crate::window::TimeWindow;
use chrono::NaiveDateTime;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{read_calendar, unfold},
};

/// Parse ICS content into an Event struct
pub fn parse_event(content: &str) -> Option<Event> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    let id = vevent.find_prop("UID")?.val.to_string();
    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_default();
    let (start, tzid) =
        to_naive(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);
    let (end, _) = to_naive(DatePerhapsTime::try_from(vevent.find_prop("DTEND")?).ok()?);

    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| p.val.to_string());

    let updated = vevent
        .find_prop("LAST-MODIFIED")
        .and_then(|p| NaiveDateTime::parse_from_str(p.val.as_ref(), "%Y%m%dT%H%M%SZ").ok())
        .map(|dt| dt.and_utc());

    // Reminders from VALARM components
    let reminders: Vec<Reminder> = vevent
        .components
        .iter()
        .filter(|c| c.name == "VALARM")
        .filter_map(|alarm| {
            let trigger = alarm.find_prop("TRIGGER")?.val.as_ref();
            let minutes = parse_trigger_minutes(trigger)?;
            Some(Reminder { minutes })
        })
        .collect();

    Some(Event {
        id,
        title,
        description,
        window: TimeWindow::new(start, end),
        reminders,
        tzid,
        updated,
    })
}

/// Wall-clock time of a DTSTART/DTEND value, plus its TZID if it has one.
/// All-day values read as midnight; UTC values keep their UTC wall clock.
fn to_naive(dpt: DatePerhapsTime) -> (NaiveDateTime, Option<String>) {
    match dpt {
        DatePerhapsTime::Date(d) => (d.and_time(chrono::NaiveTime::MIN), None),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => (dt.naive_utc(), Some("UTC".to_string())),
            CalendarDateTime::Floating(naive) => (naive, None),
            CalendarDateTime::WithTimezone { date_time, tzid } => (date_time, Some(tzid)),
        },
    }
}

/// Parse TRIGGER value to minutes before event (-PT30M, -P7D, etc.)
fn parse_trigger_minutes(value: &str) -> Option<i64> {
    let is_before = value.starts_with('-');
    let duration_str = value.trim_start_matches(['-', '+']);

    let duration = iso8601::duration(duration_str).ok()?;
    let std_duration: std::time::Duration = duration.into();
    let minutes = (std_duration.as_secs() / 60) as i64;

    Some(if is_before { minutes } else { -minutes })
}
