//! Notification settings store
//!
//! Recipients and message templates for correction mails. The file is
//! created with a default on first use and afterwards returned verbatim.

use crate::error::Result;
use crate::storage;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_SUBJECT: &str = "LCR Correction Data for Material";

const DEFAULT_BODY: &str = "Dear Concerned,

Please find the following LCR correction details:

Material: {material}
Description: {description}
File: {file}
Line: {line}
Machine & Side: {machine_side}
Standard Value: {standard_value}
Measured Value: {measured_value}
AVL: {avl}
Error: {error}
Remarks: {remarks}
Standard Tol%: {standard_tol}
Correction Tol%: {correction_tol}

Best regards,
Your Team
";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub recipients: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            recipients: vec![
                "recipient1@example.com".into(),
                "recipient2@example.com".into(),
            ],
            cc: Vec::new(),
            subject: DEFAULT_SUBJECT.into(),
            body: DEFAULT_BODY.into(),
        }
    }
}

impl NotificationConfig {
    /// Load the stored settings, writing the default first if none exist
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: NotificationConfig = serde_json::from_str(&content)?;
            return Ok(config);
        }

        let config = Self::default();
        config.save(path)?;
        tracing::info!(path = %path.display(), "default notification settings written");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        storage::write_atomic(path, content.as_bytes())
    }

    /// Settings built from form text; address lists are comma separated
    pub fn from_form(recipients: &str, cc: &str, subject: &str, body: &str) -> Self {
        Self {
            recipients: parse_address_list(recipients),
            cc: parse_address_list(cc),
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }
}

/// Partial edit of the settings; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    pub recipients: Option<String>,
    pub cc: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

impl NotificationConfig {
    /// Copy of these settings with the given fields replaced
    pub fn apply(&self, update: SettingsUpdate) -> Self {
        let mut updated = self.clone();
        if let Some(recipients) = update.recipients {
            updated.recipients = parse_address_list(&recipients);
        }
        if let Some(cc) = update.cc {
            updated.cc = parse_address_list(&cc);
        }
        if let Some(subject) = update.subject {
            updated.subject = subject;
        }
        if let Some(body) = update.body {
            updated.body = body;
        }
        updated
    }
}

/// Split a comma-separated list, trimming entries. Addresses are not validated.
pub fn parse_address_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
