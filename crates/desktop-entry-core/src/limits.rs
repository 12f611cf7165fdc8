use serde::Deserialize;

pub const DEFAULT_MAX_KEY_LEN: usize = 63;
pub const DEFAULT_MAX_VALUE_LEN: usize = 255;

/// Length caps applied while reading a record.
///
/// A key stops growing at `max_key_len` characters and whatever follows is
/// left in the stream, which normally turns the line into a syntax error. A
/// value stops at `max_value_len` bytes and the rest of its physical line is
/// discarded, so the next record starts on the following line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseLimits {
    pub max_key_len: usize,
    pub max_value_len: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_key_len: DEFAULT_MAX_KEY_LEN,
            max_value_len: DEFAULT_MAX_VALUE_LEN,
        }
    }
}
