use crate::error::LcrError;
use lcr_common::MatchRecord;

/// Part-number column headers, in preference order
pub const KEY_COLUMNS: [&str; 2] = ["Material", "Internal P/N"];

/// Description column headers, in preference order
pub const DESCRIPTION_COLUMNS: [&str; 2] = ["Long. Description", "Description"];

/// A file that could not be searched
#[derive(Debug)]
pub struct FileError {
    pub file_name: String,
    pub error: LcrError,
}

/// Matches grouped by input file order, then row order
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub matches: Vec<MatchRecord>,
    pub errors: Vec<FileError>,
    /// Files without a part-number column
    pub skipped: Vec<String>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
