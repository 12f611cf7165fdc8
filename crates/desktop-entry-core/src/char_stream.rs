use std::io::{BufReader, Bytes, Read};
use std::path::Path;

use crate::error::{StreamError, StreamResult};

pub const NEWLINE: u8 = b'\n';

/// One character of lookahead. `Held(None)` is a pushed-back end of input.
#[derive(Debug, Default)]
enum Lookahead {
    #[default]
    Empty,
    Held(Option<u8>),
}

impl Lookahead {
    fn hold(&mut self, c: Option<u8>) -> StreamResult<()> {
        match self {
            Lookahead::Empty => {
                *self = Lookahead::Held(c);
                Ok(())
            }
            Lookahead::Held(_) => Err(StreamError::PushbackOccupied),
        }
    }

    fn take(&mut self) -> Option<Option<u8>> {
        match std::mem::take(self) {
            Lookahead::Empty => None,
            Lookahead::Held(c) => Some(c),
        }
    }
}

/// Byte stream with comments and backslash escapes already applied.
///
/// Characters are `Option<u8>`, with `None` marking end of input. A `#` and
/// the rest of its line come back as a single newline. A `\` is swallowed and
/// the byte after it is returned as-is, so an escaped newline never moves the
/// line counter.
pub struct CharStream<'a, R> {
    bytes: Bytes<BufReader<R>>,
    path: &'a Path,
    line: u32,
    lookahead: Lookahead,
    deferred: Option<StreamError>,
}

impl<'a, R: Read> CharStream<'a, R> {
    pub fn new(source: R, path: &'a Path) -> Self {
        Self {
            bytes: BufReader::new(source).bytes(),
            path,
            line: 1,
            lookahead: Lookahead::Empty,
            deferred: None,
        }
    }

    pub fn path(&self) -> &'a Path {
        self.path
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn next_char(&mut self) -> StreamResult<Option<u8>> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        if let Some(c) = self.lookahead.take() {
            return Ok(c);
        }
        match self.read_raw()? {
            Some(b'#') => {
                self.discard_comment()?;
                Ok(Some(NEWLINE))
            }
            Some(b'\\') => self.read_raw(),
            Some(NEWLINE) => {
                self.line = self.line.saturating_add(1);
                Ok(Some(NEWLINE))
            }
            other => Ok(other),
        }
    }

    /// Makes `c` the next character returned. Only one may be pending.
    pub fn pushback(&mut self, c: Option<u8>) -> StreamResult<()> {
        self.lookahead.hold(c)
    }

    /// Holds a failure back until the next `next_char` call, so a record that
    /// was already complete can still be returned.
    pub fn defer_error(&mut self, err: StreamError) {
        self.deferred = Some(err);
    }

    pub fn skip_to_end_of_line(&mut self) -> StreamResult<()> {
        loop {
            match self.next_char()? {
                None | Some(NEWLINE) => return Ok(()),
                Some(_) => {}
            }
        }
    }

    // Raw bytes up to and including the newline; escapes are not honoured here.
    fn discard_comment(&mut self) -> StreamResult<()> {
        while let Some(byte) = self.read_raw()? {
            if byte == NEWLINE {
                self.line = self.line.saturating_add(1);
                break;
            }
        }
        Ok(())
    }

    fn read_raw(&mut self) -> StreamResult<Option<u8>> {
        Ok(self.bytes.next().transpose()?)
    }
}
