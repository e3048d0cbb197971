//! Interactive data entry
//!
//! Picking one search match, filling in the correction fields, and editing
//! the notification settings from the terminal.

use crate::error::{LcrError, Result};
use crate::mail_config::{parse_address_list, NotificationConfig};
use dialoguer::{Editor, Input, Select};
use lcr_common::{CorrectionField, CorrectionFields, MatchRecord};

/// Fields not given on the command line
pub fn missing_fields(fields: &CorrectionFields) -> Vec<CorrectionField> {
    CorrectionField::ALL
        .into_iter()
        .filter(|field| !fields.contains(*field))
        .collect()
}

fn prompt_error(e: dialoguer::Error) -> LcrError {
    LcrError::Prompt(e.to_string())
}

/// Choose the match to record against.
///
/// `pick` is 1-based. Without it a single match is taken as is, several
/// matches need either a terminal selection or `pick`.
pub fn choose_match(matches: &[MatchRecord], pick: Option<usize>, interactive: bool) -> Result<MatchRecord> {
    if matches.is_empty() {
        return Err(LcrError::InvalidInput("no matching data found".into()));
    }

    if let Some(n) = pick {
        return matches
            .get(n.wrapping_sub(1))
            .cloned()
            .ok_or_else(|| LcrError::InvalidInput(format!("--pick {} is out of range 1-{}", n, matches.len())));
    }

    if matches.len() == 1 {
        return Ok(matches[0].clone());
    }

    if !interactive {
        return Err(LcrError::InvalidInput(format!(
            "{} matches found; choose one with --pick",
            matches.len()
        )));
    }

    let items: Vec<String> = matches
        .iter()
        .map(|m| format!("{} | {} | {}", m.material, m.description, m.source_file))
        .collect();

    let index = Select::new()
        .with_prompt("Select the row to record")
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    Ok(matches[index].clone())
}

/// Ask for every field still missing from `fields`
pub fn prompt_fields(matched: &MatchRecord, mut fields: CorrectionFields) -> Result<CorrectionFields> {
    println!("Material: {}", matched.material);
    println!("Description: {}", matched.description);
    println!("---");

    for field in missing_fields(&fields) {
        let value: String = Input::new()
            .with_prompt(field.column())
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        fields.set(field, value);
    }

    Ok(fields)
}

/// Settings form, pre-filled with the current values
pub fn prompt_settings(current: &NotificationConfig) -> Result<NotificationConfig> {
    let recipients: String = Input::new()
        .with_prompt("Recipients (comma separated)")
        .with_initial_text(current.recipients.join(", "))
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    let cc: String = Input::new()
        .with_prompt("CC (comma separated)")
        .with_initial_text(current.cc.join(", "))
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    let subject: String = Input::new()
        .with_prompt("Subject")
        .with_initial_text(current.subject.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    // editor closed without saving keeps the old body
    let body = Editor::new()
        .edit(&current.body)
        .map_err(|e| LcrError::Prompt(e.to_string()))?
        .unwrap_or_else(|| current.body.clone());

    Ok(NotificationConfig {
        recipients: parse_address_list(&recipients),
        cc: parse_address_list(&cc),
        subject,
        body,
    })
}
