// src/main.rs

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;

use cli::Cli;

fn main() -> ExitCode {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match commands::cmd_convert(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("sccs2rcs: fatal error, {:#}", e);
            ExitCode::FAILURE
        }
    }
}
