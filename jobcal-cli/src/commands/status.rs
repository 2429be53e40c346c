use anyhow::{Context, Result};
use jobcal_core::JobCalError;
use jobcal_core::constants::HEADER_OFFSET;
use jobcal_core::schema::ColumnMap;
use jobcal_core::store::{CsvSheet, TableStore};
use owo_colors::OwoColorize;

use super::Settings;
use crate::SheetArgs;
use crate::render::render_status;

pub fn run(args: &SheetArgs) -> Result<()> {
    let settings = Settings::load(args)?;
    let mut sheet = CsvSheet::new(&settings.workbook_dir, &settings.sheet_name);

    let table = sheet
        .read_table()
        .with_context(|| format!("Could not read {}", sheet.path().display()))?;
    if table.is_empty() {
        println!("{}", JobCalError::NoData.to_string().dimmed());
        return Ok(());
    }
    let columns = ColumnMap::bind(&table.header)?;

    println!("{} {}", "📄".dimmed(), sheet.name());
    for index in 0..table.rows.len() {
        let row = columns.row(&table, index);
        let client = row.title().unwrap_or_else(|| "(no name)".to_string());
        let delivery = row
            .delivery()
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "no date".to_string());
        let event_id = row.event_id().unwrap_or_default();

        println!(
            "   {} {} {} {} {}",
            format!("R{}", index + HEADER_OFFSET).dimmed(),
            client,
            delivery.dimmed(),
            render_status(row.status()),
            event_id.dimmed()
        );
    }

    Ok(())
}
