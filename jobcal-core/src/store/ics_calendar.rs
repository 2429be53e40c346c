//! A calendar kept as a directory of .ics files, one per event.

use std::path::{Path, PathBuf};

use chrono::Utc;
use chrono_tz::Tz;

use crate::error::{JobCalError, JobCalResult};
use crate::event::{Event, Reminder};
use crate::ics::{generate_ics, parse_event};
use crate::store::{CalendarStore, Lookup};
use crate::window::TimeWindow;

pub struct IcsCalendar {
    dir: PathBuf,
    timezone: Option<Tz>,
}

impl IcsCalendar {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        IcsCalendar {
            dir: dir.into(),
            timezone: None,
        }
    }

    /// Write event times in this zone instead of as floating times.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of an event's file, or `None` for ids that can't name a file here.
    fn path_for(&self, id: &str) -> Option<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return None;
        }
        Some(self.dir.join(format!("{}.ics", id)))
    }

    fn load(&self, id: &str) -> JobCalResult<Event> {
        let path = self
            .path_for(id)
            .filter(|p| p.exists())
            .ok_or_else(|| JobCalError::EventNotFound(id.to_string()))?;

        let content = std::fs::read_to_string(&path)?;
        parse_event(&content).ok_or_else(|| {
            JobCalError::IcsParse(format!("Failed to parse event from {}", path.display()))
        })
    }

    fn save(&self, event: &mut Event) -> JobCalResult<()> {
        let path = self
            .path_for(&event.id)
            .ok_or_else(|| JobCalError::Calendar(format!("Invalid event id '{}'", event.id)))?;

        event.updated = Some(Utc::now());
        let content = generate_ics(event)?;

        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    fn modify(&mut self, id: &str, change: impl FnOnce(&mut Event)) -> JobCalResult<()> {
        let mut event = self.load(id)?;
        change(&mut event);
        self.save(&mut event)
    }

    /// All events in the directory, skipping files that don't parse.
    pub fn events(&self) -> JobCalResult<Vec<Event>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut events: Vec<Event> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "ics"))
            .filter_map(|path| std::fs::read_to_string(path).ok())
            .filter_map(|content| parse_event(&content))
            .collect();

        events.sort_by(|a, b| a.window.start.cmp(&b.window.start));
        Ok(events)
    }
}

impl CalendarStore for IcsCalendar {
    fn lookup(&mut self, id: &str) -> Lookup {
        match self.load(id) {
            Ok(event) if event.id == id => Lookup::Found(event),
            Ok(event) => {
                tracing::debug!(event_id = id, uid = %event.id, "Event file holds a different UID");
                Lookup::NotFound
            }
            Err(e) => {
                tracing::debug!(event_id = id, error = %e, "Stored event id does not resolve");
                Lookup::NotFound
            }
        }
    }

    fn create_event(
        &mut self,
        title: &str,
        window: &TimeWindow,
        description: &str,
    ) -> JobCalResult<Event> {
        let mut event = Event::new(uuid::Uuid::new_v4().to_string(), title, *window, description);
        event.tzid = self.timezone.map(|tz| tz.name().to_string());

        self.save(&mut event)?;
        Ok(event)
    }

    fn set_title(&mut self, id: &str, title: &str) -> JobCalResult<()> {
        self.modify(id, |event| event.title = title.to_string())
    }

    fn set_description(&mut self, id: &str, description: &str) -> JobCalResult<()> {
        self.modify(id, |event| event.description = Some(description.to_string()))
    }

    fn set_time(&mut self, id: &str, window: &TimeWindow) -> JobCalResult<()> {
        let tzid = self.timezone.map(|tz| tz.name().to_string());
        self.modify(id, |event| {
            event.window = *window;
            if tzid.is_some() {
                event.tzid = tzid;
            }
        })
    }

    fn remove_all_reminders(&mut self, id: &str) -> JobCalResult<()> {
        self.modify(id, |event| event.reminders.clear())
    }

    fn add_popup_reminder(&mut self, id: &str, minutes: i64) -> JobCalResult<()> {
        self.modify(id, |event| event.reminders.push(Reminder { minutes }))
    }
}
