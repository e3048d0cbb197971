//! Search and correction-log record types

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Column layout of the correction log, in write order
pub const LOG_COLUMNS: [&str; 14] = [
    "Material",
    "Description",
    "File",
    "Line",
    "Machine & Side",
    "Standard Value",
    "Measured Value",
    "AVL",
    "Error",
    "Remarks",
    "Standard Tol%",
    "Correction Tol%",
    "Timestamp",
    "Status",
];

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A BOM row matching the searched part number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub material: String,
    pub description: String,
    pub source_file: String,
}

impl MatchRecord {
    pub fn new(
        material: impl Into<String>,
        description: impl Into<String>,
        source_file: impl Into<String>,
    ) -> Self {
        Self {
            material: material.into(),
            description: description.into(),
            source_file: source_file.into(),
        }
    }
}

/// Free-form fields entered alongside a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CorrectionField {
    Line,
    MachineSide,
    StandardValue,
    MeasuredValue,
    Avl,
    Error,
    Remarks,
    StandardTol,
    CorrectionTol,
}

impl CorrectionField {
    /// Entry-form order
    pub const ALL: [CorrectionField; 9] = [
        CorrectionField::Line,
        CorrectionField::MachineSide,
        CorrectionField::StandardValue,
        CorrectionField::MeasuredValue,
        CorrectionField::Avl,
        CorrectionField::Error,
        CorrectionField::Remarks,
        CorrectionField::StandardTol,
        CorrectionField::CorrectionTol,
    ];

    /// Log column header
    pub fn column(&self) -> &'static str {
        match self {
            CorrectionField::Line => "Line",
            CorrectionField::MachineSide => "Machine & Side",
            CorrectionField::StandardValue => "Standard Value",
            CorrectionField::MeasuredValue => "Measured Value",
            CorrectionField::Avl => "AVL",
            CorrectionField::Error => "Error",
            CorrectionField::Remarks => "Remarks",
            CorrectionField::StandardTol => "Standard Tol%",
            CorrectionField::CorrectionTol => "Correction Tol%",
        }
    }

    /// Template placeholder name
    pub fn placeholder(&self) -> &'static str {
        match self {
            CorrectionField::Line => "line",
            CorrectionField::MachineSide => "machine_side",
            CorrectionField::StandardValue => "standard_value",
            CorrectionField::MeasuredValue => "measured_value",
            CorrectionField::Avl => "avl",
            CorrectionField::Error => "error",
            CorrectionField::Remarks => "remarks",
            CorrectionField::StandardTol => "standard_tol",
            CorrectionField::CorrectionTol => "correction_tol",
        }
    }

    /// Look up a field by column header or placeholder name
    pub fn from_name(name: &str) -> Option<CorrectionField> {
        let name = name.trim();
        Self::ALL.into_iter().find(|field| {
            field.column().eq_ignore_ascii_case(name) || field.placeholder().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for CorrectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for CorrectionField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::InvalidInput(format!("unknown field '{}'", s)))
    }
}

/// User-entered values, keyed by field. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionFields(BTreeMap<CorrectionField, String>);

impl CorrectionFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `name -> value` pairs, names being column headers or placeholders
    pub fn from_named<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut fields = Self::new();
        for (name, value) in pairs {
            let field: CorrectionField = name.as_ref().parse()?;
            fields.set(field, value);
        }
        Ok(fields)
    }

    pub fn set(&mut self, field: CorrectionField, value: impl Into<String>) {
        let value: String = value.into();
        self.0.insert(field, value.trim().to_string());
    }

    pub fn with(mut self, field: CorrectionField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: CorrectionField) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: CorrectionField) -> bool {
        self.0.contains_key(&field)
    }

    /// All nine fields in entry-form order
    pub fn iter(&self) -> impl Iterator<Item = (CorrectionField, &str)> {
        CorrectionField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

/// Lifecycle state of a correction-log row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Saved,
    Sent,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Saved => "Saved",
            Status::Sent => "Sent",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Saved" => Ok(Status::Saved),
            "Sent" => Ok(Status::Sent),
            other => Err(Error::InvalidInput(format!("unknown status '{}'", other))),
        }
    }
}

/// A match plus the correction data recorded against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    pub matched: MatchRecord,
    pub fields: CorrectionFields,
    pub status: Status,
    pub timestamp: NaiveDateTime,
}

impl CorrectionRecord {
    /// New record in the `Saved` state
    pub fn saved(matched: MatchRecord, fields: CorrectionFields, timestamp: NaiveDateTime) -> Self {
        Self {
            matched,
            fields,
            status: Status::Saved,
            timestamp,
        }
    }

    /// Copy of this record marked `Sent` at the dispatch time
    pub fn sent(&self, at: NaiveDateTime) -> Self {
        Self {
            status: Status::Sent,
            timestamp: at,
            ..self.clone()
        }
    }

    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Value for a log column, `None` for columns outside the log layout
    pub fn column_value(&self, column: &str) -> Option<String> {
        match column {
            "Material" => Some(self.matched.material.clone()),
            "Description" => Some(self.matched.description.clone()),
            "File" => Some(self.matched.source_file.clone()),
            "Timestamp" => Some(self.timestamp_text()),
            "Status" => Some(self.status.to_string()),
            other => CorrectionField::ALL
                .into_iter()
                .find(|field| field.column() == other)
                .map(|field| self.fields.get(field).to_string()),
        }
    }

    /// Row in `LOG_COLUMNS` order
    pub fn to_row(&self) -> Vec<String> {
        LOG_COLUMNS
            .iter()
            .map(|column| self.column_value(column).unwrap_or_default())
            .collect()
    }

    /// `(placeholder, value)` pairs for message templates
    pub fn placeholders(&self) -> Vec<(&'static str, &str)> {
        let mut values = vec![
            ("material", self.matched.material.as_str()),
            ("description", self.matched.description.as_str()),
            ("file", self.matched.source_file.as_str()),
        ];
        values.extend(self.fields.iter().map(|(field, value)| (field.placeholder(), value)));
        values
    }
}
