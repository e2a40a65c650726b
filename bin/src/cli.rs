use crate::config::{FormatterConfig, NamerChoice};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "replot",
    version,
    about = "Rebuilds minimal plot commands from plot documents"
)]
pub struct Cli {
    /// Formatter config file, instead of `<config_dir>/replot/config.toml`.
    #[arg(long, global = true, env = "REPLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file, or directory for per-process log files.
    #[arg(long, global = true, env = "REPLOT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the command reproducing a plot document.
    Format(FormatArgs),
    /// Check that the rendered command parses back to the assembled parameters.
    Check(CheckArgs),
    /// List plot types, plotters and shading modes.
    Types,
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Plot document (TOML).
    pub document: PathBuf,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Print the grouped settings as JSON instead of shell text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Plot document (TOML).
    pub document: PathBuf,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Flags overriding individual formatter config fields.
#[derive(Debug, Default, Args)]
pub struct StyleArgs {
    /// Also write parameters that equal their defaults.
    #[arg(long, short)]
    pub verbose: bool,

    /// Preferred line width.
    #[arg(long)]
    pub wrap: Option<usize>,

    /// Spaces per group level.
    #[arg(long)]
    pub indent: Option<usize>,

    /// Words written before the task name.
    #[arg(long)]
    pub invocation: Option<String>,

    /// Name tables by label rather than load location.
    #[arg(long)]
    pub label_tables: bool,
}

impl StyleArgs {
    pub fn apply(&self, config: &mut FormatterConfig) {
        if self.verbose {
            config.include_defaults = true;
        }
        if let Some(wrap) = self.wrap {
            config.wrap = wrap;
        }
        if let Some(indent) = self.indent {
            config.indent = indent;
        }
        if let Some(invocation) = &self.invocation {
            config.invocation = invocation.clone();
        }
        if self.label_tables {
            config.table_namer = NamerChoice::Label;
        }
    }
}
