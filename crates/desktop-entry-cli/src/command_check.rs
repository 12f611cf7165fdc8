use std::io::Write;
use std::path::PathBuf;

use desktop_entry_core::{Diagnostic, load_with_limits};
use thiserror::Error;

use crate::config::load_config_or_default;
use crate::error::CliError;

#[derive(Debug, Error)]
pub enum CheckCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("check failed with {0} diagnostics")]
    Failed(usize),
}

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub files: Vec<PathBuf>,
    pub config_path: PathBuf,
}

pub fn run_check(
    options: &CheckOptions,
    out: &mut impl Write,
) -> Result<Vec<Diagnostic>, CheckCommandError> {
    let config = load_config_or_default(&options.config_path)?;

    let mut diagnostics = Vec::new();
    for file in &options.files {
        let report = load_with_limits(file, &config.limits);
        for diagnostic in &report.diagnostics {
            writeln!(out, "{diagnostic}")?;
        }
        diagnostics.extend(report.diagnostics);
    }

    if diagnostics.is_empty() {
        Ok(diagnostics)
    } else {
        Err(CheckCommandError::Failed(diagnostics.len()))
    }
}
