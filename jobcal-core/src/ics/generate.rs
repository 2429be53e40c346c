//! ICS file generation.

use crate::error::JobCalResult;
use crate::event::Event;
use chrono::NaiveDateTime;
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};

/// Generate .ics content for a single event
pub fn generate_ics(event: &Event) -> JobCalResult<String> {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.id);
    ics_event.summary(&event.title);

    // DTSTAMP - required by RFC 5545, use updated timestamp or current time
    let dtstamp = event
        .updated
        .unwrap_or_else(chrono::Utc::now)
        .format("%Y%m%dT%H%M%SZ")
        .to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    if let Some(updated) = event.updated {
        let last_modified = updated.format("%Y%m%dT%H%M%SZ").to_string();
        ics_event.add_property("LAST-MODIFIED", &last_modified);
    }

    add_datetime_property(&mut ics_event, "DTSTART", &event.window.start, event.tzid.as_deref());
    add_datetime_property(&mut ics_event, "DTEND", &event.window.end, event.tzid.as_deref());

    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    // Popup reminders map to DISPLAY alarms
    for reminder in &event.reminders {
        let trigger = Trigger::before_start(chrono::Duration::minutes(reminder.minutes));
        let alarm = Alarm::display("Reminder", trigger);
        ics_event.alarm(alarm);
    }

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with JOBCAL
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove DTSTAMP and UID inside VALARM sections (not required by RFC 5545)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:JOBCAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Floating datetime, or datetime with a TZID parameter when a zone is known
fn add_datetime_property(
    ics_event: &mut icalendar::Event,
    name: &str,
    time: &NaiveDateTime,
    tzid: Option<&str>,
) {
    let value = time.format("%Y%m%dT%H%M%S").to_string();
    match tzid {
        Some(tzid) => {
            let mut prop = Property::new(name, value);
            prop.add_parameter("TZID", tzid);
            ics_event.append_property(prop);
        }
        None => {
            ics_event.add_property(name, value);
        }
    }
}
