#![forbid(unsafe_code)]

mod cli;
mod command_check;
mod command_show;
mod config;
mod error;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::cli::CliAppError;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliAppError::Usage(message)) => {
            eprintln!("{message}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
