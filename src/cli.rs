use clap::{Args, Parser, Subcommand};
use lcr_common::{ComponentClass, CorrectionField, CorrectionFields};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lcr")]
#[command(about = "BOM part search, LCR correction log and component tolerance calculator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// BOM folder (overrides the configured folder)
    #[arg(long, global = true)]
    pub folder: Option<PathBuf>,

    /// Correction log workbook (overrides the configured path)
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    /// Notification settings file (overrides the configured path)
    #[arg(long, global = true)]
    pub mail_config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the BOM workbooks in the folder
    Files,

    /// Search BOM workbooks for a part number
    Search {
        /// Part number (exact, case-sensitive)
        #[arg(required = true)]
        key: String,

        /// Restrict the search to this workbook (repeatable; default: all)
        #[arg(short, long = "file")]
        files: Vec<String>,
    },

    /// Record an LCR correction against a search match
    Record {
        /// Part number (exact, case-sensitive)
        #[arg(required = true)]
        key: String,

        /// Restrict the search to this workbook (repeatable; default: all)
        #[arg(short, long = "file")]
        files: Vec<String>,

        /// Row of the search result to record (1-based)
        #[arg(short, long)]
        pick: Option<usize>,

        #[command(flatten)]
        fields: FieldArgs,

        /// Do not prompt; fields not given stay empty
        #[arg(long)]
        no_prompt: bool,

        /// Mail the saved record to the configured recipients
        #[arg(long)]
        send: bool,

        /// Write the mail as .eml into this folder instead of sending it
        #[arg(long, requires = "send")]
        outbox: Option<PathBuf>,
    },

    /// Show the correction log
    Log,

    /// Minimum and maximum of a value with tolerance
    Calc {
        /// Nominal value
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Tolerance (%)
        #[arg(allow_hyphen_values = true)]
        tolerance: String,

        /// Component type (capacitor/resistor/inductor)
        #[arg(short, long, default_value = "capacitor")]
        class: ComponentClass,

        /// Unit shown with the result (default: base unit of the class)
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Convert a value between LCR units
    Convert {
        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// From unit
        from: String,

        /// To unit
        to: String,

        /// Component type (capacitor/resistor/inductor)
        #[arg(short, long, default_value = "capacitor")]
        class: ComponentClass,
    },

    /// List the units of a component type
    Units {
        /// Component type (default: all)
        #[arg(short, long)]
        class: Option<ComponentClass>,
    },

    /// Show the reference component table
    Table,

    /// Show or edit the notification settings
    Email {
        /// Show settings
        #[arg(long)]
        show: bool,

        /// Recipients (comma separated)
        #[arg(long)]
        recipients: Option<String>,

        /// CC (comma separated)
        #[arg(long)]
        cc: Option<String>,

        /// Subject template
        #[arg(long)]
        subject: Option<String>,

        /// Read the body template from a file
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Edit all settings interactively
        #[arg(long)]
        edit: bool,
    },

    /// Show or edit application settings
    Config {
        /// Show settings
        #[arg(long)]
        show: bool,

        /// Set the BOM folder
        #[arg(long)]
        set_folder: Option<PathBuf>,

        /// Set the correction log workbook
        #[arg(long)]
        set_log: Option<PathBuf>,

        /// Set the sender address
        #[arg(long)]
        set_from: Option<String>,

        /// Set the sendmail-compatible command, e.g. "msmtp -t"
        #[arg(long)]
        set_mail_command: Option<String>,
    },
}

/// Correction fields given on the command line
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Line
    #[arg(long)]
    pub line: Option<String>,

    /// Machine & side
    #[arg(long)]
    pub machine_side: Option<String>,

    /// Standard value
    #[arg(long)]
    pub standard_value: Option<String>,

    /// Measured value
    #[arg(long)]
    pub measured_value: Option<String>,

    /// AVL
    #[arg(long)]
    pub avl: Option<String>,

    /// Error
    #[arg(long)]
    pub error: Option<String>,

    /// Remarks
    #[arg(long)]
    pub remarks: Option<String>,

    /// Standard tolerance (%)
    #[arg(long)]
    pub standard_tol: Option<String>,

    /// Correction tolerance (%)
    #[arg(long)]
    pub correction_tol: Option<String>,
}

impl FieldArgs {
    pub fn into_fields(self) -> CorrectionFields {
        let given = [
            (CorrectionField::Line, self.line),
            (CorrectionField::MachineSide, self.machine_side),
            (CorrectionField::StandardValue, self.standard_value),
            (CorrectionField::MeasuredValue, self.measured_value),
            (CorrectionField::Avl, self.avl),
            (CorrectionField::Error, self.error),
            (CorrectionField::Remarks, self.remarks),
            (CorrectionField::StandardTol, self.standard_tol),
            (CorrectionField::CorrectionTol, self.correction_tol),
        ];

        let mut fields = CorrectionFields::new();
        for (field, value) in given {
            if let Some(value) = value {
                fields.set(field, value);
            }
        }
        fields
    }
}
