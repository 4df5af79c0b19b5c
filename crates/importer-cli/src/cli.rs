//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use importer_cli::overrides::{MappingOverride, parse_mapping_override};

#[derive(Parser)]
#[command(
    name = "importer",
    version,
    about = "Map spreadsheet uploads onto a column template",
    long_about = "Map spreadsheet uploads onto a column template.\n\n\
                  Reads CSV, TSV, XLS and XLSX files, suggests a mapping of the\n\
                  uploaded columns onto the template and writes the mapped rows\n\
                  as JSON."
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

    /// Log output format.
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

    /// Allow uploaded cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a file and write the mapped rows as JSON.
    Import(ImportArgs),

    /// Show the parsed rows of a file.
    Inspect(InspectArgs),

    /// Write the template's example CSV.
    Template(TemplateArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// File to import (.csv, .tsv, .xls or .xlsx).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Template JSON file (overrides the template in --config).
    #[arg(long = "template", value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Importer configuration JSON file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Treat the first row as the header.
    #[arg(long = "skip-header")]
    pub skip_header: bool,

    /// Zero-based header row among the parsed rows.
    #[arg(long = "header-row", value_name = "N", default_value_t = 0)]
    pub header_row: usize,

    /// Map an uploaded column (header or index) to a template key.
    #[arg(long = "map", value_name = "COLUMN=KEY", value_parser = parse_mapping_override)]
    pub map: Vec<MappingOverride>,

    /// Leave an uploaded column (header or index) out of the output.
    #[arg(long = "exclude", value_name = "COLUMN")]
    pub exclude: Vec<String>,

    /// Write the payload here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// File to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of rows to show.
    #[arg(long = "rows", value_name = "N", default_value_t = 20)]
    pub rows: usize,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// Template JSON file.
    #[arg(long = "template", value_name = "PATH")]
    pub template: PathBuf,

    /// Output path (default: ./example.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
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
