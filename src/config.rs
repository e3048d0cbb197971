use crate::error::{LcrError, Result};
use crate::storage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const MAIL_CONFIG_FILE_NAME: &str = "email_config.json";

/// Application settings: where the BOMs and the correction log live, and how mail goes out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bom_folder: PathBuf,
    pub log_path: PathBuf,
    /// Notification template file; `None` means `email_config.json` in the config dir
    pub mail_config_path: Option<PathBuf>,
    pub from_address: Option<String>,
    /// sendmail-compatible command, program first
    pub mail_command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        storage::write_atomic(path, content.as_bytes())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LcrError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("lcr-pro"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Resolved notification template path
    pub fn mail_config_path(&self) -> Result<PathBuf> {
        match &self.mail_config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join(MAIL_CONFIG_FILE_NAME)),
        }
    }

    fn default_config() -> Self {
        Self {
            bom_folder: PathBuf::from("SMT_BOM"),
            log_path: PathBuf::from("SMT_LCR").join("LCR-Correction Record.xlsx"),
            mail_config_path: None,
            from_address: None,
            mail_command: vec!["sendmail".into(), "-t".into(), "-i".into()],
        }
    }

    /// Parse a command line such as `sendmail -t -i` into program and arguments
    pub fn set_mail_command(&mut self, command: &str) -> Result<()> {
        let parts: Vec<String> = command.split_whitespace().map(String::from).collect();
        if parts.is_empty() {
            return Err(LcrError::Config("mail command is empty".into()));
        }
        self.mail_command = parts;
        Ok(())
    }
}
