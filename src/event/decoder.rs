// Line decoder for test2json records

use super::Event;
use thiserror::Error;

/// A line of the event stream that is not a valid event record
#[derive(Debug, Error)]
#[error("error decoding event on line {line_number}: {line}")]
pub struct DecodeError {
    pub line_number: usize,
    pub line: String,
    #[source]
    pub source: serde_json::Error,
}

/// Decode one line of the stream. `line_number` is 1-based and only used for
/// error reporting.
pub fn decode_line(line_number: usize, line: &str) -> Result<Event, DecodeError> {
    decode_slice(line_number, line.as_bytes())
}

/// Decode raw line bytes; invalid UTF-8 is a decode error like any other
/// malformed record.
pub fn decode_slice(line_number: usize, line: &[u8]) -> Result<Event, DecodeError> {
    serde_json::from_slice(line).map_err(|source| DecodeError {
        line_number,
        line: String::from_utf8_lossy(line).into_owned(),
        source,
    })
}
