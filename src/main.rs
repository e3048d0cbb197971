use clap::Parser;
use lcr_common::{
    calculate_with_tolerance, format_scientific, parse_value, reference_table, ComponentClass,
};
use lcr_pro::{cli, config, entry, error, mail_config, notifier, recorder, report, scanner, search};
use cli::{Cli, Commands, FieldArgs};
use config::Config;
use error::{LcrError, Result};
use mail_config::{NotificationConfig, SettingsUpdate};
use notifier::{CommandTransport, MailTransport, OutboxTransport};
use recorder::CorrectionLog;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Per-invocation overrides of the stored settings
struct Overrides {
    folder: Option<PathBuf>,
    log: Option<PathBuf>,
    mail_config: Option<PathBuf>,
}

impl Overrides {
    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        if let Some(folder) = self.folder.clone() {
            config.bom_folder = folder;
        }
        if let Some(log) = self.log.clone() {
            config.log_path = log;
        }
        if let Some(path) = self.mail_config.clone() {
            config.mail_config_path = Some(path);
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        folder: cli.folder,
        log: cli.log,
        mail_config: cli.mail_config,
    };

    // calc/convert/units/table never read the settings
    match cli.command {
        Commands::Files => {
            let config = overrides.load_config()?;
            let files = scanner::scan_folder(&config.bom_folder)?;
            if files.is_empty() {
                eprintln!("⚠ No Excel files found in the folder: {}", config.bom_folder.display());
            }
            for file in files {
                println!("{}", file.file_name);
            }
        }

        Commands::Search { key, files } => {
            let config = overrides.load_config()?;
            let outcome = run_search(&config, &key, &files)?;
            if outcome.is_empty() {
                println!("No matching data found.");
            } else {
                println!("{}", report::matches_table(&outcome.matches));
                println!("✔ {} match(es)", outcome.matches.len());
            }
        }

        Commands::Record { key, files, pick, fields, no_prompt, send, outbox } => {
            let config = overrides.load_config()?;
            run_record(&config, &key, &files, pick, fields, !no_prompt, send, outbox)?;
        }

        Commands::Log => {
            let config = overrides.load_config()?;
            let log = CorrectionLog::new(&config.log_path);
            if !log.path().exists() {
                println!("No corrections recorded yet: {}", log.path().display());
                return Ok(());
            }
            let table = log.read()?;
            println!("{}", report::workbook_table(&table));
            println!("{} row(s) in {}", table.len(), log.path().display());
        }

        Commands::Calc { value, tolerance, class, unit } => {
            let value = parse_value(&value)?;
            let tolerance = parse_value(&tolerance)?;
            let unit = unit.unwrap_or_else(|| class.base_unit().to_string());
            class.check_unit(&unit)?;

            let window = calculate_with_tolerance(value, tolerance);
            println!("Min: {:.2}{}, Max: {:.2}{}", window.min, unit, window.max, unit);
        }

        Commands::Convert { value, from, to, class } => {
            let value = parse_value(&value)?;
            let converted = class.convert(value, &from, &to)?;
            println!("Converted Value: {} {}", format_scientific(converted, 2), to);
        }

        Commands::Units { class } => {
            let classes = match class {
                Some(class) => vec![class],
                None => ComponentClass::ALL.to_vec(),
            };
            println!("{}", report::units_view(&classes));
        }

        Commands::Table => {
            println!("{}", report::reference_view(&reference_table()));
        }

        Commands::Email { show, recipients, cc, subject, body_file, edit } => {
            let config = overrides.load_config()?;
            let path = config.mail_config_path()?;
            let current = NotificationConfig::load_or_init(&path)?;

            let updated = if edit {
                entry::prompt_settings(&current)?
            } else {
                let body = match body_file {
                    Some(body_file) => Some(std::fs::read_to_string(&body_file)?),
                    None => None,
                };
                current.apply(SettingsUpdate { recipients, cc, subject, body })
            };

            let changed = updated != current;
            if changed {
                updated.save(&path)?;
                println!("✔ Email settings saved successfully!");
            }

            for name in notifier::unknown_placeholders(&updated) {
                eprintln!("⚠ Unknown placeholder {{{}}} will be sent as written", name);
            }

            if show || !changed {
                print_mail_settings(&updated, &path);
            }
        }

        Commands::Config { show, set_folder, set_log, set_from, set_mail_command } => {
            // overrides from global flags are not persisted
            let mut stored = Config::load()?;
            let mut changed = false;

            if let Some(folder) = set_folder {
                stored.bom_folder = folder;
                changed = true;
            }
            if let Some(log) = set_log {
                stored.log_path = log;
                changed = true;
            }
            if let Some(from) = set_from {
                stored.from_address = Some(from).filter(|f| !f.trim().is_empty());
                changed = true;
            }
            if let Some(command) = set_mail_command {
                stored.set_mail_command(&command)?;
                changed = true;
            }

            if changed {
                stored.save()?;
                println!("✔ Settings saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                print_settings(&stored)?;
            }
        }
    }

    Ok(())
}

fn run_search(config: &Config, key: &str, names: &[String]) -> Result<search::SearchOutcome> {
    let key = search::normalize_key(key)?;

    let available = scanner::scan_folder(&config.bom_folder)?;
    if available.is_empty() {
        return Err(LcrError::NoFilesFound(config.bom_folder.display().to_string()));
    }
    let selected = scanner::select_files(&available, names)?;

    let outcome = search::search_files(&selected, &key);
    for failed in &outcome.errors {
        eprintln!("⚠ {}: {}", failed.file_name, failed.error);
    }
    Ok(outcome)
}

#[allow(clippy::too_many_arguments)]
fn run_record(
    config: &Config,
    key: &str,
    files: &[String],
    pick: Option<usize>,
    fields: FieldArgs,
    prompt: bool,
    send: bool,
    outbox: Option<PathBuf>,
) -> Result<()> {
    let outcome = run_search(config, key, files)?;
    if outcome.is_empty() {
        println!("No matching data found.");
        return Ok(());
    }

    let interactive = prompt && std::io::stdin().is_terminal();
    if outcome.matches.len() > 1 && pick.is_none() {
        println!("{}", report::matches_table(&outcome.matches));
    }
    let matched = entry::choose_match(&outcome.matches, pick, interactive)?;

    let mut fields = fields.into_fields();
    if interactive {
        fields = entry::prompt_fields(&matched, fields)?;
    }

    let log = CorrectionLog::new(&config.log_path);
    let record = log.save(matched, fields)?;
    println!("✔ Data saved successfully! ({})", log.path().display());

    if send {
        let mail_settings = NotificationConfig::load_or_init(&config.mail_config_path()?)?;
        let transport = build_transport(config, outbox.as_deref());
        notifier::send_record(&record, &mail_settings, transport.as_ref(), &log)?;
        println!("✔ The data has been emailed to the concerned persons.");
    }

    Ok(())
}

fn build_transport(config: &Config, outbox: Option<&Path>) -> Box<dyn MailTransport> {
    match outbox {
        Some(dir) => Box::new(OutboxTransport::new(dir, config.from_address.clone())),
        None => Box::new(CommandTransport::new(
            config.mail_command.clone(),
            config.from_address.clone(),
        )),
    }
}

fn print_mail_settings(settings: &NotificationConfig, path: &Path) {
    println!("Email settings ({}):", path.display());
    println!("  Recipients: {}", settings.recipients.join(", "));
    println!("  CC: {}", settings.cc.join(", "));
    println!("  Subject: {}", settings.subject);
    println!("  Body:");
    for line in settings.body.lines() {
        println!("    {}", line);
    }
}

fn print_settings(config: &Config) -> Result<()> {
    println!("Settings ({}):", Config::config_path()?.display());
    println!("  BOM folder: {}", config.bom_folder.display());
    println!("  Correction log: {}", config.log_path.display());
    println!("  Email settings: {}", config.mail_config_path()?.display());
    println!("  From: {}", config.from_address.as_deref().unwrap_or("(not set)"));
    println!("  Mail command: {}", config.mail_command.join(" "));
    Ok(())
}
