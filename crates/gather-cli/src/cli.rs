//! CLI argument definitions for the gather tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "gather",
    version,
    about = "Gather catalogue worksheets into EAD XML",
    long_about = "Convert catalogue template worksheets into EAD 2002 documents.\n\n\
                  Each worksheet becomes one XML file; every row becomes a record\n\
                  with its controlled-access headings matched against an\n\
                  authority workbook."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert the worksheets of a workbook into EAD XML files.
    Convert(ConvertArgs),

    /// List the worksheets of a workbook with their record counts.
    Sheets(SheetsArgs),

    /// Print the effective column layout.
    Layout(LayoutArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Catalogue workbook: a spreadsheet file, a CSV file or a folder of CSV files.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Authority workbook holding names and identifiers.
    #[arg(long = "authorities", value_name = "FILE")]
    pub authorities: PathBuf,

    /// Worksheet of the authority workbook to read (overrides the config file).
    #[arg(long = "authority-sheet", value_name = "NAME")]
    pub authority_sheet: Option<String>,

    /// TOML file overriding the column layout and authority settings.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output directory for XML files (default: the workbook's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only convert the named worksheet (repeatable).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheets: Vec<String>,

    /// Write each document on a single line.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Omit the comment that precedes every record.
    #[arg(long = "no-record-comments")]
    pub no_record_comments: bool,

    /// Build every document without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Also write the run summary as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Do not draw progress bars.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct SheetsArgs {
    /// Catalogue workbook: a spreadsheet file, a CSV file or a folder of CSV files.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,
}

#[derive(Parser)]
pub struct LayoutArgs {
    /// TOML file overriding the column layout.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print as a table or as TOML ready to edit.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: LayoutFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutFormatArg {
    Table,
    Toml,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
