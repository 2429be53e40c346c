//! A sheet whose alerts are shown on the terminal.

use jobcal_core::JobCalResult;
use jobcal_core::store::{CsvSheet, TableStore};
use jobcal_core::table::{CellRef, Table};
use owo_colors::OwoColorize;

pub struct ConsoleSheet {
    inner: CsvSheet,
}

impl ConsoleSheet {
    pub fn new(inner: CsvSheet) -> Self {
        ConsoleSheet { inner }
    }
}

/// Success alerts go to stdout, everything else to stderr.
fn render_alert(message: &str) -> (bool, String) {
    if message.starts_with("Success") {
        (true, message.green().bold().to_string())
    } else {
        (false, message.red().bold().to_string())
    }
}

impl TableStore for ConsoleSheet {
    fn read_table(&mut self) -> JobCalResult<Table> {
        self.inner.read_table()
    }

    fn write_cell(&mut self, cell: CellRef, value: &str) -> JobCalResult<()> {
        self.inner.write_cell(cell, value)
    }

    fn flush(&mut self) -> JobCalResult<()> {
        self.inner.flush()
    }

    fn alert(&mut self, message: &str) {
        match render_alert(message) {
            (true, line) => println!("{}", line),
            (false, line) => eprintln!("{}", line),
        }
    }
}
