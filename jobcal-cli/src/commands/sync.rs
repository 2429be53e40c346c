use std::process::ExitCode;

use anyhow::Result;
use jobcal_core::store::{CsvSheet, IcsCalendar};
use jobcal_core::{ReminderPolicy, process_events};
use owo_colors::OwoColorize;

use super::Settings;
use crate::SheetArgs;
use crate::console::ConsoleSheet;
use crate::render::Render;

pub fn run(args: &SheetArgs) -> Result<ExitCode> {
    let settings = Settings::load(args)?;

    let mut sheet = ConsoleSheet::new(CsvSheet::new(&settings.workbook_dir, &settings.sheet_name));
    let mut calendar = IcsCalendar::new(&settings.calendar_dir);
    if let Some(tz) = settings.timezone {
        calendar = calendar.with_timezone(tz);
    }

    println!(
        "{} {}",
        "📄".dimmed(),
        settings.workbook_dir.join(format!("{}.csv", settings.sheet_name)).display()
    );

    // The alert has already been shown; only the exit code is left to set.
    let Ok(summary) = process_events(&mut sheet, &mut calendar, ReminderPolicy::default()) else {
        return Ok(ExitCode::FAILURE);
    };

    for report in &summary.rows {
        println!("   {}", report.render());
    }
    println!("{}", summary.render());

    Ok(ExitCode::SUCCESS)
}
