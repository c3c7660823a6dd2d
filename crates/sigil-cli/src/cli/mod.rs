use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `sigil` binary.
#[derive(Debug, Parser)]
#[command(name = "sigil", version, about = "Sigil - config schemas from constructor signatures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file layered over `.sigil/config.toml`
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog path (overrides `general.catalog`)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            config: self.config.clone(),
            catalog: self.catalog.clone(),
        }
    }
}
