//! Global jobcal configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SHEET_NAME;
use crate::error::{JobCalError, JobCalResult};

static DEFAULT_WORKBOOK_DIR: &str = "~/jobcal";
static DEFAULT_CALENDAR_DIR: &str = "~/calendar/jobs";

fn default_workbook_dir() -> PathBuf {
    PathBuf::from(DEFAULT_WORKBOOK_DIR)
}

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

/// Configuration at ~/.config/jobcal/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JobcalConfig {
    /// Directory holding the workbook's sheets as CSV files
    #[serde(default = "default_workbook_dir")]
    pub workbook_dir: PathBuf,

    /// Sheet with the job rows (`<workbook_dir>/<sheet_name>.csv`)
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Directory events are written to, one .ics file each
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,

    /// IANA timezone for event times (floating when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for JobcalConfig {
    fn default() -> Self {
        JobcalConfig {
            workbook_dir: default_workbook_dir(),
            sheet_name: default_sheet_name(),
            calendar_dir: default_calendar_dir(),
            timezone: None,
        }
    }
}

impl JobcalConfig {
    pub fn config_path() -> JobCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| JobCalError::Config("Could not determine config directory".into()))?
            .join("jobcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/jobcal/config.toml, creating a commented default first if needed.
    pub fn load() -> JobCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> JobCalResult<Self> {
        let config: JobcalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| JobCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| JobCalError::Config(e.to_string()))?;

        config.timezone()?;
        Ok(config)
    }

    pub fn workbook_path(&self) -> PathBuf {
        expand(&self.workbook_dir)
    }

    pub fn calendar_path(&self) -> PathBuf {
        expand(&self.calendar_dir)
    }

    pub fn timezone(&self) -> JobCalResult<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| JobCalError::Config(format!("Unknown timezone '{}'", name)))
            })
            .transpose()
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> JobCalResult<()> {
        let contents = format!(
            "\
# jobcal configuration

# Folder holding the workbook's sheets as CSV files:
# workbook_dir = \"{}\"

# Sheet with the job rows (read from <workbook_dir>/<sheet_name>.csv):
# sheet_name = \"{}\"

# Where calendar events are written:
# calendar_dir = \"{}\"

# Timezone for event times (leave unset for floating local times):
# timezone = \"Asia/Kolkata\"
",
            DEFAULT_WORKBOOK_DIR, DEFAULT_SHEET_NAME, DEFAULT_CALENDAR_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                JobCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| JobCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_file_loads_as_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobcal").join("config.toml");

        JobcalConfig::create_default_config(&path).unwrap();
        let config = JobcalConfig::load_from(&path).unwrap();

        assert_eq!(config, JobcalConfig::default());
        assert_eq!(config.sheet_name, "Calendar Events Data");
    }

    #[test]
    fn values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "workbook_dir = \"/srv/boutique\"\nsheet_name = \"Orders\"\ntimezone = \"Asia/Kolkata\"\n",
        )
        .unwrap();

        let config = JobcalConfig::load_from(&path).unwrap();

        assert_eq!(config.workbook_path(), PathBuf::from("/srv/boutique"));
        assert_eq!(config.sheet_name, "Orders");
        assert_eq!(config.calendar_dir, PathBuf::from("~/calendar/jobs"));
        assert_eq!(config.timezone().unwrap(), Some(chrono_tz::Asia::Kolkata));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timezone = \"Mars/Olympus\"\n").unwrap();

        let err = JobcalConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, JobCalError::Config(_)));
    }
}
