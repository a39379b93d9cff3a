//! Tapir CLI
//!
//! `tapir <file>` runs a program file; `tapir` alone starts the interactive loop.

use std::process::ExitCode;
use tapir_core::cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr so program output on stdout stays untouched
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli::run_cli() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
