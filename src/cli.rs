use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueHint};

mod run_impl;

#[derive(Parser, Debug, Clone)]
#[command(name = "binguard", version, about = "Fail if binary assets are tracked by Git", long_about = None)]
pub struct Args {
    /// Directory inside the repository to check
    #[arg(value_name = "PATH", default_value = ".", value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Extra comma-separated extensions to treat as binary, e.g. psd,blend
    #[arg(long = "ext", value_name = "LIST")]
    pub extensions: Option<String>,

    /// Output JSON instead of the text report
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,

    /// Show a progress bar
    #[arg(long = "progress", action = ArgAction::SetTrue)]
    pub progress: bool,

    /// Verbose logging
    #[arg(long = "verbose", short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parses arguments and runs the check.
///
/// Returns the process exit code: 0 when clean, 1 when violations were found.
///
/// # Errors
/// Returns an error if the repository cannot be opened or its index read.
pub fn run() -> Result<u8> {
    let args = Args::parse();
    run_impl::run_with_args(&args)
}
