//! Spreadsheet tables
//!
//! A table is the first worksheet of a workbook with its first row taken as
//! the header. Every cell is held as text. Reading goes through calamine,
//! writing through rust_xlsxwriter.

use crate::error::{LcrError, Result};
use crate::storage;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn with_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// First of `aliases` present in the header, in alias order
    pub fn find_column(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|alias| self.column_index(alias))
    }

    /// Cell text, empty when the row is shorter than the header
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Text form of a cell value
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // integral values without a decimal part
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn read_error(path: &Path, reason: impl ToString) -> LcrError {
    LcrError::SheetRead {
        file: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Read the first worksheet of an Excel file
pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(LcrError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(path, e))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| read_error(path, e))?,
        None => return Err(read_error(path, "workbook contains no sheets")),
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(cell_text).collect(),
        None => return Ok(Table::default()),
    };
    let rows: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    tracing::debug!(
        file = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "table read"
    );
    Ok(Table { headers, rows })
}

fn write_error(e: XlsxError) -> LcrError {
    LcrError::SheetWrite(e.to_string())
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| LcrError::SheetWrite(format!("too many columns: {}", col + 1)))
}

fn row_number(row: usize) -> Result<u32> {
    u32::try_from(row).map_err(|_| LcrError::SheetWrite(format!("too many rows: {}", row + 1)))
}

/// Serialize a table to xlsx bytes: bold header row, empty cells left blank
pub fn table_to_xlsx(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1").map_err(write_error)?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, column_number(col)?, header, &header_format)
            .map_err(write_error)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_number(row_idx + 1)?;
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row_num, column_number(col)?, value)
                .map_err(write_error)?;
        }
    }

    workbook.save_to_buffer().map_err(write_error)
}

/// Replace the file at `path` with `table`
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let bytes = table_to_xlsx(table)?;
    storage::write_atomic(path, &bytes)
}
