use std::io::Write;
use std::path::PathBuf;

use desktop_entry_core::{DesktopEntry, LoadReport, load_with_limits};
use serde::Serialize;
use thiserror::Error;

use crate::config::{OutputFormat, load_config_or_default};
use crate::error::CliError;

#[derive(Debug, Error)]
pub enum ShowCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ShowOptions {
    pub files: Vec<PathBuf>,
    pub config_path: PathBuf,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ShownEntry<'a> {
    file: String,
    #[serde(flatten)]
    entry: &'a DesktopEntry,
    launchable: bool,
}

/// Prints name, comment and exec for each file. Diagnostics go to stderr.
pub fn run_show(
    options: &ShowOptions,
    out: &mut impl Write,
) -> Result<Vec<LoadReport>, ShowCommandError> {
    let config = load_config_or_default(&options.config_path)?;
    let format = if options.json {
        OutputFormat::Json
    } else {
        config.output
    };

    let reports: Vec<LoadReport> = options
        .files
        .iter()
        .map(|file| load_with_limits(file, &config.limits))
        .collect();

    for report in &reports {
        for diagnostic in &report.diagnostics {
            eprintln!("{diagnostic}");
        }
    }

    match format {
        OutputFormat::Text => {
            for (file, report) in options.files.iter().zip(&reports) {
                write_text(out, &file.display().to_string(), &report.entry)?;
            }
        }
        OutputFormat::Json => {
            let shown: Vec<ShownEntry<'_>> = options
                .files
                .iter()
                .zip(&reports)
                .map(|(file, report)| ShownEntry {
                    file: file.display().to_string(),
                    entry: &report.entry,
                    launchable: report.entry.is_launchable(),
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &shown)?;
            writeln!(out)?;
        }
    }
    Ok(reports)
}

fn write_text(out: &mut impl Write, file: &str, entry: &DesktopEntry) -> std::io::Result<()> {
    writeln!(out, "{file}")?;
    writeln!(out, "  Name:    {}", entry.name.as_deref().unwrap_or("-"))?;
    writeln!(out, "  Comment: {}", entry.comment.as_deref().unwrap_or("-"))?;
    writeln!(out, "  Exec:    {}", entry.exec.as_deref().unwrap_or("-"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ShowOptions, run_show};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("desktop_entry_show_{nanos}"));
        fs::create_dir_all(&path).expect("dir");
        path
    }

    #[test]
    fn shows_entries_as_text() {
        let root = temp_dir();
        let file = root.join("editor.desktop");
        fs::write(&file, "[Desktop Entry]\nName=Editor\nExec=edit %F\n").expect("write");

        let options = ShowOptions {
            files: vec![file],
            config_path: root.join("desktop-entry.toml"),
            json: false,
        };
        let mut out = Vec::new();
        let reports = run_show(&options, &mut out).expect("run");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("  Name:    Editor"));
        assert!(text.contains("  Comment: -"));
        assert!(text.contains("  Exec:    edit %F"));
        assert!(reports[0].diagnostics.is_empty());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn shows_entries_as_json() {
        let root = temp_dir();
        let file = root.join("tool.desktop");
        fs::write(&file, "Name=Tool\nComment=Does things\n").expect("write");

        let options = ShowOptions {
            files: vec![file],
            config_path: root.join("desktop-entry.toml"),
            json: true,
        };
        let mut out = Vec::new();
        let reports = run_show(&options, &mut out).expect("run");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value[0]["name"], "Tool");
        assert_eq!(value[0]["comment"], "Does things");
        assert!(value[0]["exec"].is_null());
        assert_eq!(value[0]["launchable"], false);

        let diagnostic = serde_json::to_value(&reports[0].diagnostics[0]).expect("json");
        assert_eq!(diagnostic["kind"], "missing_field");
        assert_eq!(diagnostic["line"], 3);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn config_selects_json_and_limits() {
        let root = temp_dir();
        let file = root.join("long.desktop");
        fs::write(&file, "Name=abcdefgh\nExec=x\n").expect("write");
        let config_path = root.join("desktop-entry.toml");
        fs::write(&config_path, "output = \"json\"\n[limits]\nmax_value_len = 3\n")
            .expect("write config");

        let options = ShowOptions {
            files: vec![file],
            config_path,
            json: false,
        };
        let mut out = Vec::new();
        run_show(&options, &mut out).expect("run");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value[0]["name"], "abc");

        fs::remove_dir_all(&root).ok();
    }
}
