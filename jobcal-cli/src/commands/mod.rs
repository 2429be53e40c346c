pub mod status;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use jobcal_core::config::JobcalConfig;

use crate::SheetArgs;

/// Where a command reads and writes, after applying flag overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub workbook_dir: PathBuf,
    pub sheet_name: String,
    pub calendar_dir: PathBuf,
    pub timezone: Option<Tz>,
}

impl Settings {
    pub fn load(args: &SheetArgs) -> Result<Self> {
        let config = JobcalConfig::load().context("Failed to load jobcal config")?;
        let settings = Self::resolve(&config, args)?;

        tracing::debug!(
            workbook = %settings.workbook_dir.display(),
            sheet = %settings.sheet_name,
            calendar = %settings.calendar_dir.display(),
            "Resolved settings"
        );
        Ok(settings)
    }

    /// Flags win over the config file.
    pub fn resolve(config: &JobcalConfig, args: &SheetArgs) -> Result<Self> {
        Ok(Settings {
            workbook_dir: args
                .workbook
                .clone()
                .unwrap_or_else(|| config.workbook_path()),
            sheet_name: args
                .sheet
                .clone()
                .unwrap_or_else(|| config.sheet_name.clone()),
            calendar_dir: args
                .calendar
                .clone()
                .unwrap_or_else(|| config.calendar_path()),
            timezone: config.timezone()?,
        })
    }
}
