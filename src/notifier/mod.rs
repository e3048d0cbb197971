//! Correction mail notifier
//!
//! Renders the configured subject/body for a saved record, hands the mail
//! to a transport and, once the transport accepts it, appends a second
//! `Sent` row to the correction log. A failed dispatch writes nothing.

pub mod template;
mod transport;

pub use transport::{
    encode_header, format_message, CommandTransport, MailTransport, OutboxTransport, OutgoingMail,
};

use crate::error::{LcrError, Result};
use crate::mail_config::NotificationConfig;
use crate::recorder::{self, CorrectionLog};
use chrono::NaiveDateTime;
use lcr_common::{CorrectionField, CorrectionRecord};

/// Placeholder names a template can use
pub fn known_placeholders() -> Vec<&'static str> {
    let mut names = vec!["material", "description", "file"];
    names.extend(CorrectionField::ALL.iter().map(|field| field.placeholder()));
    names
}

/// Placeholders in the subject or body that no record can fill
pub fn unknown_placeholders(config: &NotificationConfig) -> Vec<String> {
    let known = known_placeholders();
    let mut unknown = template::placeholders(&config.subject);
    for name in template::placeholders(&config.body) {
        if !unknown.contains(&name) {
            unknown.push(name);
        }
    }
    unknown.retain(|name| !known.contains(&name.as_str()));
    unknown
}

/// Build the outgoing mail for a record
pub fn compose(record: &CorrectionRecord, config: &NotificationConfig) -> OutgoingMail {
    let values = record.placeholders();
    let subject = template::render(&config.subject, &values);

    OutgoingMail {
        to: config.recipients.clone(),
        cc: config.cc.clone(),
        // header must stay on one line
        subject: subject.replace(['\r', '\n'], " "),
        body: template::render(&config.body, &values),
    }
}

/// Dispatch `record` and log the `Sent` copy. Returns that copy.
pub fn send_record(
    record: &CorrectionRecord,
    config: &NotificationConfig,
    transport: &dyn MailTransport,
    log: &CorrectionLog,
) -> Result<CorrectionRecord> {
    send_record_at(record, config, transport, log, recorder::local_now())
}

/// `send_record` with an explicit dispatch time
pub fn send_record_at(
    record: &CorrectionRecord,
    config: &NotificationConfig,
    transport: &dyn MailTransport,
    log: &CorrectionLog,
    at: NaiveDateTime,
) -> Result<CorrectionRecord> {
    dispatch(record, config, transport)?;
    let sent = record.sent(at);
    log.append(&sent)?;
    Ok(sent)
}

fn dispatch(
    record: &CorrectionRecord,
    config: &NotificationConfig,
    transport: &dyn MailTransport,
) -> Result<()> {
    for name in unknown_placeholders(config) {
        tracing::warn!(placeholder = %name, "template placeholder left as written");
    }

    let mail = compose(record, config);

    if mail.to.is_empty() {
        return Err(LcrError::Transport("no recipients configured".into()));
    }

    transport.send(&mail).map_err(|e| match e {
        LcrError::Transport(_) => e,
        other => LcrError::Transport(other.to_string()),
    })?;

    tracing::debug!(material = %record.matched.material, "correction mail dispatched");
    Ok(())
}
