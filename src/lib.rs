pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod mail_config;
pub mod notifier;
pub mod recorder;
pub mod report;
pub mod scanner;
pub mod search;
pub mod storage;
pub mod workbook;

pub use lcr_common;
