use thiserror::Error;

#[derive(Error, Debug)]
pub enum LcrError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("No Excel files found in the folder: {0}")]
    NoFilesFound(String),

    #[error("Error reading file {file}: {reason}")]
    SheetRead { file: String, reason: String },

    #[error("Error writing spreadsheet: {0}")]
    SheetWrite(String),

    #[error("{file} has no {expected} column")]
    MissingColumn { file: String, expected: String },

    #[error("Unexpected column '{column}' in {file}")]
    SchemaMismatch { file: String, column: String },

    #[error("Failed to send mail: {0}")]
    Transport(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] lcr_common::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LcrError>;
