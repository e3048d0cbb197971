//! LCR Common Library
//!
//! Types and pure calculations shared by the correction-log tool and the
//! component calculator. Nothing in here touches the filesystem.

pub mod error;
pub mod reference;
pub mod types;
pub mod units;

pub use error::{Error, Result};
pub use reference::{reference_table, ReferenceRow};
pub use types::{
    CorrectionField, CorrectionFields, CorrectionRecord, MatchRecord, Status, LOG_COLUMNS,
    TIMESTAMP_FORMAT,
};
pub use units::{
    calculate_with_tolerance, convert, format_scientific, parse_quantity, parse_value, unit_factor,
    units_for, ComponentClass, ToleranceResult,
};
