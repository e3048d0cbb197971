//! LCR correction log
//!
//! An append-only workbook with a fixed column layout (`LOG_COLUMNS`).
//! Every append reads the whole table, checks its header against the
//! layout, adds one row at the end and replaces the file. There is no
//! locking; a concurrent writer's change can be lost.

use crate::error::{LcrError, Result};
use crate::workbook::{self, Table};
use chrono::{NaiveDateTime, Timelike};
use lcr_common::{CorrectionFields, CorrectionRecord, MatchRecord, LOG_COLUMNS};
use std::path::{Path, PathBuf};

/// Current local time, second precision
pub fn local_now() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[derive(Debug, Clone)]
pub struct CorrectionLog {
    path: PathBuf,
}

impl CorrectionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the log with the full header if it does not exist yet.
    /// Returns whether a file was created.
    pub fn ensure_created(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        workbook::write_table(&self.path, &Table::with_headers(&LOG_COLUMNS))?;
        tracing::info!(path = %self.path.display(), "correction log created");
        Ok(true)
    }

    /// Read the log in the fixed column layout
    pub fn read(&self) -> Result<Table> {
        let table = workbook::read_table(&self.path)?;
        conform(table, &self.path.display().to_string())
    }

    /// Append `record` as the last row. Returns the row count afterwards.
    pub fn append(&self, record: &CorrectionRecord) -> Result<usize> {
        self.ensure_created()?;

        let mut table = self.read()?;
        table.rows.push(record.to_row());
        workbook::write_table(&self.path, &table)?;

        tracing::info!(
            material = %record.matched.material,
            status = %record.status,
            rows = table.len(),
            "correction record appended"
        );
        Ok(table.len())
    }

    /// Build a `Saved` record for `matched` and append it
    pub fn save(&self, matched: MatchRecord, fields: CorrectionFields) -> Result<CorrectionRecord> {
        self.save_at(matched, fields, local_now())
    }

    pub fn save_at(
        &self,
        matched: MatchRecord,
        fields: CorrectionFields,
        at: NaiveDateTime,
    ) -> Result<CorrectionRecord> {
        let record = CorrectionRecord::saved(matched, fields, at);
        self.append(&record)?;
        Ok(record)
    }
}

/// Map a stored table onto `LOG_COLUMNS`.
///
/// Columns outside the layout, or repeated, are rejected. Layout columns
/// missing from an older file come back blank.
fn conform(table: Table, file: &str) -> Result<Table> {
    if let Some(column) = table
        .headers
        .iter()
        .find(|h| !LOG_COLUMNS.contains(&h.as_str()))
    {
        return Err(LcrError::SchemaMismatch {
            file: file.to_string(),
            column: column.clone(),
        });
    }

    for (i, header) in table.headers.iter().enumerate() {
        if table.headers[..i].contains(header) {
            return Err(LcrError::SchemaMismatch {
                file: file.to_string(),
                column: format!("{} (duplicated)", header),
            });
        }
    }

    if table.headers.iter().map(String::as_str).eq(LOG_COLUMNS) {
        return Ok(table);
    }

    let positions: Vec<Option<usize>> = LOG_COLUMNS
        .iter()
        .map(|column| table.column_index(column))
        .collect();

    let mut conformed = Table::with_headers(&LOG_COLUMNS);
    for row in 0..table.len() {
        conformed.rows.push(
            positions
                .iter()
                .map(|pos| pos.map(|col| table.cell(row, col).to_string()).unwrap_or_default())
                .collect(),
        );
    }
    Ok(conformed)
}
