//! PharmaCalc - Command Line Entry Point

use calc_host::{handle_json, init_logging, Cli, HostConfig};
use clap::Parser;
use std::io::Read;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = HostConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level_override() {
        config.log_level = level.to_string();
    }
    init_logging(&config)?;

    info!("=== PharmaCalc v{} ===", env!("CARGO_PKG_VERSION"));

    let body = match &cli.request {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            body
        }
    };

    println!("{}", handle_json(&config, &body)?);
    Ok(())
}
