//! Part-number search over BOM workbooks
//!
//! Each selected workbook is read in full and its part-number column is
//! compared as text against the key (exact, case-sensitive). A file that
//! fails to load is reported and the search moves on.

mod types;

pub use types::{FileError, SearchOutcome, DESCRIPTION_COLUMNS, KEY_COLUMNS};

use crate::error::{LcrError, Result};
use crate::scanner::BomFile;
use crate::workbook::{self, Table};
use lcr_common::MatchRecord;

/// Outcome of searching one table
#[derive(Debug, PartialEq, Eq)]
pub enum TableMatches {
    /// No recognized part-number column
    NoKeyColumn,
    Found(Vec<MatchRecord>),
}

/// Rows of `table` whose part number equals `key`
pub fn search_table(table: &Table, file_name: &str, key: &str) -> Result<TableMatches> {
    let key_col = match table.find_column(&KEY_COLUMNS) {
        Some(col) => col,
        None => return Ok(TableMatches::NoKeyColumn),
    };

    let desc_col = table
        .find_column(&DESCRIPTION_COLUMNS)
        .ok_or_else(|| LcrError::MissingColumn {
            file: file_name.to_string(),
            expected: DESCRIPTION_COLUMNS.join(" / "),
        })?;

    let matches = (0..table.len())
        .filter(|&row| table.cell(row, key_col) == key)
        .map(|row| {
            MatchRecord::new(
                table.cell(row, key_col),
                table.cell(row, desc_col),
                file_name,
            )
        })
        .collect();

    Ok(TableMatches::Found(matches))
}

/// Search `files` in order for `key`
pub fn search_files(files: &[BomFile], key: &str) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();

    for file in files {
        let found = workbook::read_table(&file.path)
            .and_then(|table| search_table(&table, &file.file_name, key));

        match found {
            Ok(TableMatches::Found(matches)) => {
                tracing::debug!(file = %file.file_name, count = matches.len(), "file searched");
                outcome.matches.extend(matches);
            }
            Ok(TableMatches::NoKeyColumn) => {
                tracing::debug!(file = %file.file_name, "no part-number column, skipped");
                outcome.skipped.push(file.file_name.clone());
            }
            Err(error) => {
                tracing::warn!(file = %file.file_name, %error, "file could not be searched");
                outcome.errors.push(FileError {
                    file_name: file.file_name.clone(),
                    error,
                });
            }
        }
    }

    outcome
}

/// Validate a search key typed by the user
pub fn normalize_key(input: &str) -> Result<String> {
    let key = input.trim();
    if key.is_empty() {
        return Err(LcrError::InvalidInput("please enter a value to search".into()));
    }
    Ok(key.to_string())
}
