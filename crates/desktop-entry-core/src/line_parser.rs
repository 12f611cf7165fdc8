use std::io::Read;

use tracing::{trace, warn};

use crate::char_stream::CharStream;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::StreamResult;
use crate::limits::ParseLimits;
use crate::tokenizer::{discard_group_header, read_identifier, read_raw_line, skip_whitespace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    GroupHeader,
    Pair(KeyValue),
    /// The line was skipped; the diagnostic says why.
    Invalid(Diagnostic),
    EndOfInput,
}

/// Consumes one record from the stream.
///
/// Malformed lines are not fatal: the rest of the physical line is discarded
/// and the caller keeps calling.
pub fn parse_line<R: Read>(
    stream: &mut CharStream<'_, R>,
    limits: &ParseLimits,
) -> StreamResult<ParsedLine> {
    let c = skip_whitespace(stream, true)?;
    if c.is_none() {
        return Ok(ParsedLine::EndOfInput);
    }
    let line = stream.line();

    if c == Some(b'[') {
        discard_group_header(stream)?;
        trace!(file = %stream.path().display(), line, "skipped group header");
        return Ok(ParsedLine::GroupHeader);
    }

    let Some(key) = read_identifier(stream, c, limits.max_key_len)? else {
        stream.skip_to_end_of_line()?;
        return Ok(syntax_error(stream, line, "expected key or group name"));
    };

    let c = skip_whitespace(stream, false)?;
    if c != Some(b'=') {
        // A newline taken by the skip above must still end the resync.
        stream.pushback(c)?;
        stream.skip_to_end_of_line()?;
        return Ok(syntax_error(stream, line, "expected '=' after key"));
    }

    // Stops at a newline so `Key=` on its own yields an empty value.
    let c = skip_whitespace(stream, false)?;
    let value = read_raw_line(stream, c, limits.max_value_len)?;

    // The pair is complete; a failure while peeking belongs to the next call.
    match skip_whitespace(stream, true) {
        Ok(peek) => stream.pushback(peek)?,
        Err(err) => stream.defer_error(err),
    }

    Ok(ParsedLine::Pair(KeyValue { key, value, line }))
}

fn syntax_error<R: Read>(stream: &CharStream<'_, R>, line: u32, message: &str) -> ParsedLine {
    let diagnostic = Diagnostic::new(
        DiagnosticKind::Syntax,
        stream.path().display().to_string(),
        message,
    )
    .at_line(line);
    warn!(file = %diagnostic.file, line, "{message}");
    ParsedLine::Invalid(diagnostic)
}
