//! Coloured terminal rendering for jobcal types.

use jobcal_core::cell::CellValue;
use jobcal_core::reconcile::{OutcomeKind, RowReport, RunSummary};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for OutcomeKind {
    fn render(&self) -> String {
        match self {
            OutcomeKind::Created => "+".green().to_string(),
            OutcomeKind::Updated => "~".yellow().to_string(),
            OutcomeKind::Skipped => "·".dimmed().to_string(),
            OutcomeKind::Rejected | OutcomeKind::Failed => "!".red().to_string(),
        }
    }
}

impl Render for RowReport {
    fn render(&self) -> String {
        let row = format!("R{}", self.sheet_row);
        let title = self.title.as_deref().unwrap_or("(no name)");
        let status = match self.outcome.kind {
            OutcomeKind::Created => self.outcome.status.green().to_string(),
            OutcomeKind::Updated => self.outcome.status.yellow().to_string(),
            OutcomeKind::Skipped => "blank row".dimmed().to_string(),
            OutcomeKind::Rejected | OutcomeKind::Failed => self.outcome.status.red().to_string(),
        };

        format!(
            "{} {} {} {}",
            self.outcome.kind.render(),
            row.dimmed(),
            title,
            status
        )
    }
}

impl Render for RunSummary {
    fn render(&self) -> String {
        let mut parts = Vec::new();
        if self.created > 0 {
            parts.push(format!("{} created", self.created).green().to_string());
        }
        if self.updated > 0 {
            parts.push(format!("{} updated", self.updated).yellow().to_string());
        }
        if self.rejected + self.failed > 0 {
            let errors = self.rejected + self.failed;
            parts.push(format!("{} {}", errors, pluralize("error", errors)).red().to_string());
        }
        if self.skipped > 0 {
            parts.push(format!("{} blank", self.skipped).dimmed().to_string());
        }

        if parts.is_empty() {
            "No rows".dimmed().to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Status cell as shown by `jobcal status`.
pub fn render_status(status: &CellValue) -> String {
    let text = status.to_string();
    if text.is_empty() {
        "(not synced)".dimmed().to_string()
    } else if text.starts_with("Error") {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
