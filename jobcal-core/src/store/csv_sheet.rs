//! A sheet stored as `<workbook>/<sheet name>.csv`.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{JobCalError, JobCalResult};
use crate::store::TableStore;
use crate::table::{CellRef, Table};

pub struct CsvSheet {
    name: String,
    path: PathBuf,
    /// Raw records (header included) once read
    records: Option<Vec<Vec<String>>>,
    dirty: bool,
}

impl CsvSheet {
    pub fn new(workbook_dir: &Path, name: &str) -> Self {
        CsvSheet {
            name: name.to_string(),
            path: workbook_dir.join(format!("{}.csv", name)),
            records: None,
            dirty: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&mut self) -> JobCalResult<&mut Vec<Vec<String>>> {
        if self.records.is_none() {
            if !self.path.exists() {
                return Err(JobCalError::SheetNotFound(self.name.clone()));
            }

            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(&self.path)?;

            let records = reader
                .records()
                .map(|r| r.map(|record| record.iter().map(String::from).collect()))
                .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

            self.records = Some(records);
        }

        self.records
            .as_mut()
            .ok_or_else(|| JobCalError::SheetNotFound(self.name.clone()))
    }
}

impl TableStore for CsvSheet {
    fn read_table(&mut self) -> JobCalResult<Table> {
        let records = self.load()?;
        Ok(Table::from_records(records.iter()))
    }

    fn write_cell(&mut self, cell: CellRef, value: &str) -> JobCalResult<()> {
        if cell.row == 0 || cell.column == 0 {
            return Err(JobCalError::Table(format!("Invalid cell {}", cell)));
        }

        let records = self.load()?;
        let (row, column) = (cell.row - 1, cell.column - 1);

        if records.len() <= row {
            records.resize(row + 1, Vec::new());
        }
        let record = &mut records[row];
        if record.len() <= column {
            record.resize(column + 1, String::new());
        }
        record[column] = value.to_string();

        self.dirty = true;
        Ok(())
    }

    /// Rewrite the whole file through a temp file, so a crash mid-write
    /// never leaves a truncated sheet behind.
    fn flush(&mut self) -> JobCalResult<()> {
        if !self.dirty {
            return Ok(());
        }
        let Some(records) = &self.records else {
            return Ok(());
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let temp = NamedTempFile::new_in(dir)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(temp.as_file());
            for record in records {
                writer.write_record(record)?;
            }
            writer.flush()?;
        }

        temp.persist(&self.path).map_err(|e| JobCalError::Io(e.error))?;
        self.dirty = false;

        tracing::trace!(path = %self.path.display(), "Sheet flushed");
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        tracing::info!(sheet = %self.name, "{}", message);
    }
}
