//! Mail transports
//!
//! The notifier only needs "send this now" and a success/failure answer.
//! `CommandTransport` pipes the message to a sendmail-compatible program,
//! `OutboxTransport` drops it into a directory as an `.eml` file.

use crate::error::{LcrError, Result};
use base64::Engine;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
}

pub trait MailTransport {
    fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

/// Raw bytes per encoded word; keeps `Subject: =?utf-8?B?...?=` under 78 columns
const ENCODED_WORD_BYTES: usize = 39;

/// RFC 2047 `B` encoding for non-ASCII header text, folded one word per line
pub fn encode_header(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    let b64 = base64::engine::general_purpose::STANDARD;
    let mut words = Vec::new();
    let mut chunk = String::new();
    for c in text.chars() {
        if chunk.len() + c.len_utf8() > ENCODED_WORD_BYTES {
            words.push(format!("=?utf-8?B?{}?=", b64.encode(chunk.as_bytes())));
            chunk.clear();
        }
        chunk.push(c);
    }
    if !chunk.is_empty() {
        words.push(format!("=?utf-8?B?{}?=", b64.encode(chunk.as_bytes())));
    }
    words.join("\r\n ")
}

fn header_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

fn address_list(addresses: &[String]) -> String {
    addresses
        .iter()
        .map(|a| a.replace(['\r', '\n'], ""))
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// RFC 5322 message text
pub fn format_message(mail: &OutgoingMail, from: Option<&str>, date: &str) -> String {
    let mut message = String::new();
    if let Some(from) = from {
        message.push_str(&format!("From: {}\r\n", address_list(&[from.to_string()])));
    }
    message.push_str(&format!("To: {}\r\n", address_list(&mail.to)));
    if !mail.cc.is_empty() {
        message.push_str(&format!("Cc: {}\r\n", address_list(&mail.cc)));
    }
    message.push_str(&format!("Subject: {}\r\n", encode_header(&header_line(&mail.subject))));
    message.push_str(&format!("Date: {}\r\n", header_line(date)));
    message.push_str("MIME-Version: 1.0\r\n");
    message.push_str("Content-Type: text/plain; charset=utf-8\r\n");
    message.push_str("Content-Transfer-Encoding: 8bit\r\n");
    message.push_str("\r\n");
    for line in mail.body.lines() {
        message.push_str(line);
        message.push_str("\r\n");
    }
    message
}

fn current_date() -> String {
    chrono::Local::now().to_rfc2822()
}

/// sendmail-style program reading the message on stdin (`sendmail -t -i`, `msmtp -t`)
#[derive(Debug, Clone)]
pub struct CommandTransport {
    pub command: Vec<String>,
    pub from: Option<String>,
}

impl CommandTransport {
    pub fn new(command: Vec<String>, from: Option<String>) -> Self {
        Self { command, from }
    }
}

impl MailTransport for CommandTransport {
    fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| LcrError::Transport("mail command is not configured".into()))?;

        let message = format_message(mail, self.from.as_deref(), &current_date());

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| LcrError::Transport(format!("cannot start '{}': {}", program, e)))?;

        let mut write_error = None;
        if let Some(mut stdin) = child.stdin.take() {
            // a program that quits without reading gets judged by its exit status
            if let Err(e) = stdin.write_all(message.as_bytes()) {
                write_error = Some(e);
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| LcrError::Transport(format!("'{}' did not finish: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LcrError::Transport(format!(
                "'{}' exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        if let Some(e) = write_error {
            let reason = if e.kind() == ErrorKind::BrokenPipe {
                "closed its input before the whole message was written".to_string()
            } else {
                format!("write failed: {}", e)
            };
            return Err(LcrError::Transport(format!("'{}' {}", program, reason)));
        }

        tracing::info!(program = %program, to = mail.to.len(), cc = mail.cc.len(), "mail handed to transport");
        Ok(())
    }
}

/// Writes each message to `<dir>/lcr-*.eml` instead of sending it
#[derive(Debug, Clone)]
pub struct OutboxTransport {
    pub dir: PathBuf,
    pub from: Option<String>,
}

impl OutboxTransport {
    pub fn new(dir: impl Into<PathBuf>, from: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            from,
        }
    }
}

impl MailTransport for OutboxTransport {
    fn send(&self, mail: &OutgoingMail) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let message = format_message(mail, self.from.as_deref(), &current_date());
        let mut file = tempfile::Builder::new()
            .prefix("lcr-")
            .suffix(".eml")
            .tempfile_in(&self.dir)?;
        file.write_all(message.as_bytes())?;
        let (_, path) = file.keep().map_err(|e| e.error)?;

        tracing::info!(path = %path.display(), "mail written to outbox");
        Ok(())
    }
}
