//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pharmacalc")]
#[command(about = "Run a pharmaceutical calculation from a JSON request", long_about = None)]
pub struct Cli {
    /// Request file; read from stdin when omitted
    pub request: Option<PathBuf>,

    /// Configuration file (defaults to ./pharmacalc.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log level forced by `-v`, if any
    pub fn log_level_override(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}
