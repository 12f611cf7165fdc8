use std::io::Read;

use crate::char_stream::{CharStream, NEWLINE};
use crate::error::StreamResult;

/// Skips whitespace and returns the first character that was not skipped.
///
/// With `include_newlines` unset a newline ends the skip and is returned, so
/// callers can tell an empty remainder of line from content on the next one.
pub fn skip_whitespace<R: Read>(
    stream: &mut CharStream<'_, R>,
    include_newlines: bool,
) -> StreamResult<Option<u8>> {
    let mut c = stream.next_char()?;
    while let Some(byte) = c {
        if !is_space(byte) || (!include_newlines && byte == NEWLINE) {
            break;
        }
        c = stream.next_char()?;
    }
    Ok(c)
}

pub fn read_identifier<R: Read>(
    stream: &mut CharStream<'_, R>,
    first: Option<u8>,
    max_len: usize,
) -> StreamResult<Option<String>> {
    let mut ident = String::new();
    let mut c = first;
    while let Some(byte) = c {
        if ident.len() >= max_len || !is_ident_char(byte) {
            break;
        }
        ident.push(char::from(byte));
        c = stream.next_char()?;
    }
    stream.pushback(c)?;
    if ident.is_empty() {
        Ok(None)
    } else {
        Ok(Some(ident))
    }
}

/// Reads up to the end of the line. The terminating newline is consumed but
/// not stored. Past `max_len` bytes the rest of the line is thrown away.
pub fn read_raw_line<R: Read>(
    stream: &mut CharStream<'_, R>,
    first: Option<u8>,
    max_len: usize,
) -> StreamResult<String> {
    let mut bytes = Vec::new();
    let mut c = first;
    while let Some(byte) = c {
        if byte == NEWLINE {
            break;
        }
        if bytes.len() >= max_len {
            stream.skip_to_end_of_line()?;
            break;
        }
        bytes.push(byte);
        c = stream.next_char()?;
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Throws away a `[Group]` header up to and including the `]`. Anything after
/// the bracket on the same line is left for the next record.
pub fn discard_group_header<R: Read>(stream: &mut CharStream<'_, R>) -> StreamResult<()> {
    while let Some(byte) = stream.next_char()? {
        if byte == b']' {
            break;
        }
    }
    Ok(())
}

// Matches C `isspace`, which includes vertical tab unlike `u8::is_ascii_whitespace`.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

fn is_ident_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'@' | b'[' | b']')
}
