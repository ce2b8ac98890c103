// ⚠️ Error types for loading and reporting

use crate::loader::Table;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the four sales tables.
///
/// A load is all-or-nothing: any of these discards everything read so far.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened or read.
    #[error("cannot read {table} table at {}: {source}", .path.display())]
    Unreadable {
        table: Table,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row lacks a column the table requires.
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: Table, column: String },

    /// A row could not be parsed (bad number, bad date, wrong field count).
    #[error("{table} table has a malformed row{}: {source}", line_suffix(.row))]
    Malformed {
        table: Table,
        row: Option<u64>,
        #[source]
        source: csv::Error,
    },

    /// A primary key appears more than once.
    #[error("{table} table repeats key {key}")]
    DuplicateKey { table: Table, key: u64 },
}

/// A report was requested before any data was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Data not loaded yet: load the sales data first (option 1)")]
pub struct PreconditionNotMet;

fn line_suffix(row: &Option<u64>) -> String {
    row.map(|r| format!(" at line {}", r)).unwrap_or_default()
}
