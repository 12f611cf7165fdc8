#![forbid(unsafe_code)]

mod char_stream;
mod diagnostic;
mod error;
mod limits;
mod line_parser;
mod loader;
mod tokenizer;

pub use crate::char_stream::CharStream;
pub use crate::diagnostic::{Diagnostic, DiagnosticKind};
pub use crate::error::{LoadError, StreamError, StreamResult};
pub use crate::limits::{DEFAULT_MAX_KEY_LEN, DEFAULT_MAX_VALUE_LEN, ParseLimits};
pub use crate::line_parser::{KeyValue, ParsedLine, parse_line};
pub use crate::loader::{
    DESKTOP_SUFFIX, DesktopEntry, LoadReport, has_suffix, load, load_from_reader,
    load_with_limits,
};
pub use crate::tokenizer::{discard_group_header, read_identifier, read_raw_line, skip_whitespace};
