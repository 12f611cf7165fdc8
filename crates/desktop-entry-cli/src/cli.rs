use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::command_check::{CheckCommandError, CheckOptions, run_check};
use crate::command_show::{ShowCommandError, ShowOptions, run_show};
use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Debug, Error)]
pub enum CliAppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Show(#[from] ShowCommandError),
    #[error(transparent)]
    Check(#[from] CheckCommandError),
}

pub fn run() -> Result<(), CliAppError> {
    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or_else(|| CliAppError::Usage(usage()))?;
    debug!(command = %command, "dispatching");
    match command.as_str() {
        "show" => {
            let options = parse_show_options(args.collect())?;
            run_show(&options, &mut io::stdout().lock())?;
            Ok(())
        }
        "check" => {
            let options = parse_check_options(args.collect())?;
            run_check(&options, &mut io::stderr().lock())?;
            Ok(())
        }
        _ => Err(CliAppError::Usage(usage())),
    }
}

fn parse_show_options(args: Vec<String>) -> Result<ShowOptions, CliAppError> {
    let mut files = Vec::new();
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut json = false;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            flag if flag.starts_with("--") => return Err(CliAppError::Usage(usage())),
            _ => files.push(PathBuf::from(&arg)),
        }
    }
    if files.is_empty() {
        return Err(CliAppError::Usage(usage()));
    }
    Ok(ShowOptions {
        files,
        config_path,
        json,
    })
}

fn parse_check_options(args: Vec<String>) -> Result<CheckOptions, CliAppError> {
    let mut files = Vec::new();
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            flag if flag.starts_with("--") => return Err(CliAppError::Usage(usage())),
            _ => files.push(PathBuf::from(&arg)),
        }
    }
    if files.is_empty() {
        return Err(CliAppError::Usage(usage()));
    }
    Ok(CheckOptions { files, config_path })
}

fn next_value(flag: &str, iter: &mut impl Iterator<Item = String>) -> Result<String, CliAppError> {
    iter.next()
        .ok_or_else(|| CliAppError::Usage(format!("{flag} requires a value\n\n{}", usage())))
}

fn usage() -> String {
    "usage: desktop-entry show <file>... [--json] [--config <path>]\n       desktop-entry check <file>... [--config <path>]".to_string()
}
