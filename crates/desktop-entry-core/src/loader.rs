use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::char_stream::CharStream;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::{LoadError, StreamError};
use crate::limits::ParseLimits;
use crate::line_parser::{KeyValue, ParsedLine, parse_line};

pub const DESKTOP_SUFFIX: &str = ".desktop";

/// What a launcher needs from one desktop file.
///
/// `name` and `exec` are required; an entry missing either cannot be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DesktopEntry {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub exec: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryField {
    Name,
    Comment,
    Exec,
}

impl EntryField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "Name" => Some(EntryField::Name),
            "Comment" => Some(EntryField::Comment),
            "Exec" => Some(EntryField::Exec),
            _ => None,
        }
    }
}

impl DesktopEntry {
    pub fn is_launchable(&self) -> bool {
        self.name.is_some() && self.exec.is_some()
    }

    /// Stores the value if the key is one we keep. A repeated key replaces the
    /// earlier value.
    fn adopt(&mut self, pair: KeyValue) {
        let Some(field) = EntryField::from_key(&pair.key) else {
            trace!(key = %pair.key, line = pair.line, "ignored key");
            return;
        };
        debug!(key = %pair.key, line = pair.line, "adopted key");
        let slot = match field {
            EntryField::Name => &mut self.name,
            EntryField::Comment => &mut self.comment,
            EntryField::Exec => &mut self.exec,
        };
        *slot = Some(pair.value);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub entry: DesktopEntry,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

pub fn has_suffix(path: &Path, suffix: &str) -> bool {
    let name = path.as_os_str().as_encoded_bytes();
    let suffix = suffix.as_bytes();
    name.len() >= suffix.len() && name.ends_with(suffix)
}

pub fn load(path: &Path) -> LoadReport {
    load_with_limits(path, &ParseLimits::default())
}

/// Loads a desktop file from disk.
///
/// Paths not ending in `.desktop` are skipped without a diagnostic. Open
/// failures become a single diagnostic and an empty entry.
pub fn load_with_limits(path: &Path, limits: &ParseLimits) -> LoadReport {
    if !has_suffix(path, DESKTOP_SUFFIX) {
        trace!(file = %path.display(), "not a desktop file");
        return LoadReport::default();
    }
    match open_source(path) {
        Ok(file) => load_from_reader(path, file, limits),
        Err(LoadError::Open { source, .. }) => {
            let mut report = LoadReport::default();
            report.push(Diagnostic::new(
                DiagnosticKind::Open,
                path.display().to_string(),
                source.to_string(),
            ));
            report
        }
    }
}

/// Parses already-open input. `path` is used only in diagnostics.
pub fn load_from_reader<R: Read>(path: &Path, source: R, limits: &ParseLimits) -> LoadReport {
    debug!(file = %path.display(), "reading desktop file");
    let mut report = LoadReport::default();
    let mut stream = CharStream::new(source, path);

    if let Err(err) = read_records(&mut stream, limits, &mut report) {
        report.push(
            Diagnostic::new(
                DiagnosticKind::Read,
                path.display().to_string(),
                err.to_string(),
            )
            .at_line(stream.line()),
        );
    }

    let line = stream.line();
    if report.entry.name.is_none() {
        report.push(missing_field(path, line, "Name"));
    }
    if report.entry.exec.is_none() {
        report.push(missing_field(path, line, "Exec"));
    }
    debug!(
        file = %path.display(),
        lines = line,
        diagnostics = report.diagnostics.len(),
        "finished desktop file"
    );
    report
}

fn read_records<R: Read>(
    stream: &mut CharStream<'_, R>,
    limits: &ParseLimits,
    report: &mut LoadReport,
) -> Result<(), StreamError> {
    loop {
        match parse_line(stream, limits)? {
            ParsedLine::EndOfInput => return Ok(()),
            ParsedLine::GroupHeader => {}
            ParsedLine::Pair(pair) => report.entry.adopt(pair),
            ParsedLine::Invalid(diagnostic) => report.diagnostics.push(diagnostic),
        }
    }
}

fn open_source(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn missing_field(path: &Path, line: u32, key: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::MissingField,
        path.display().to_string(),
        format!("Does not have a '{key}=' field"),
    )
    .at_line(line)
}
