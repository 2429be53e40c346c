//! Core of jobcal: keep one calendar event per job row.
//!
//! This crate provides:
//! - `schema`, `cell`, `table` for reading job rows by column name
//! - `window`, `description`, `reminder` for deriving each event's fields
//! - `reconcile` for the per-row create/update pass and write-back
//! - `store` for the sheet and calendar collaborators and their backends

pub mod cell;
pub mod config;
pub mod constants;
pub mod description;
pub mod error;
pub mod event;
pub mod ics;
pub mod reconcile;
pub mod reminder;
pub mod schema;
pub mod store;
pub mod table;
pub mod window;

pub use error::{JobCalError, JobCalResult};
pub use reconcile::{Reconciler, RunSummary, process_events};
pub use reminder::ReminderPolicy;
