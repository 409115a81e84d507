// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, ValueEnum};

use crate::handlers::recognized_types_help;

/// Command-line arguments for `minideploy`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "minideploy",
    version,
    about = "Stupid simple task runner, intended for deploying/debloating/customizing Windows",
    long_about = None
)]
pub struct CliArgs {
    /// Execute actions (default behavior is to do a dry run).
    #[arg(short, long)]
    pub execute: bool,

    /// File to log to (will also output to stdout).
    #[arg(short, long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Act as if device is different model.
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Skip requesting elevation.
    #[arg(short, long)]
    pub usermode: bool,

    /// Only execute on physical machines, exit if in VM.
    #[arg(short, long)]
    pub realonly: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MINIDEPLOY_LOG` or the default (`debug`) is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Path to a config file (TOML).
    ///
    /// Default: `Minideploy.toml` in the working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse the process arguments, with the recognized file types listed
/// after the option help.
pub fn parse() -> CliArgs {
    let matches = CliArgs::command()
        .after_help(recognized_types_help())
        .get_matches();
    match CliArgs::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    }
}
