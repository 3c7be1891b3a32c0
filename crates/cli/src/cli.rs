use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::error::ConfigError;
use crate::core::model::{ListRequest, LogCategory};
use crate::core::style::Palette;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "boojo",
    version,
    about = "Boojo is a cli tool for maintaining digital and extended bullet lists",
    long_about = "Boojo is a cli tool for maintaining digital and extended bullet lists - take care of your tasks, events and notes.",
    after_help = "Examples:\n  boojo                 List open entries of the daily log (same as `boojo ls`)\n  boojo ls -l monthly +Home\n  boojo ls -a -m dentist\n  boojo ls --json @phone"
)]
pub struct Cli {
    /// Override the directory holding daily.txt, monthly.txt and future.txt
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Tracing filter for diagnostics on stderr (e.g. "warn", "debug")
    #[arg(long = "log-filter", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    /// When to color the report
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// List all entries from the specified log
    #[command(name = "ls")]
    List(ListArgs),
}

impl Default for CliCommand {
    fn default() -> Self {
        CliCommand::List(ListArgs::default())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Log type (daily, monthly, future)
    #[arg(short = 'l', long = "log", value_name = "TYPE", default_value = "daily")]
    pub log: String,

    /// Display all entries, including completed ones
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Display an extra line with meta infos (effort, due, creation and completion date, recurrence)
    #[arg(short = 'm', long = "meta")]
    pub meta: bool,

    /// Print entries and statistics as JSON instead of the colored report
    #[arg(long)]
    pub json: bool,

    /// Only show entries containing every keyword (case-insensitive)
    #[arg(value_name = "KEYWORD")]
    pub keywords: Vec<String>,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            log: LogCategory::default().to_string(),
            all: false,
            meta: false,
            json: false,
            keywords: Vec::new(),
        }
    }
}

impl ListArgs {
    pub fn to_request(&self) -> Result<ListRequest, ConfigError> {
        let category = self.log.parse::<LogCategory>()?;
        Ok(ListRequest::new(category)
            .with_keywords(self.keywords.iter().cloned())
            .include_completed(self.all))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn palette(&self) -> Palette {
        match self {
            ColorMode::Auto => Palette::for_stdout(),
            ColorMode::Always => Palette::Ansi,
            ColorMode::Never => Palette::Plain,
        }
    }
}
