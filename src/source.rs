// Event sources - named file or standard input

use crate::error::{ReportError, Result};
use crate::event::{Event, decode_slice};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where event lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    File(PathBuf),
    Stdin,
}

impl EventSource {
    /// Pick the file source when a path is given, stdin otherwise
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => EventSource::File(path.to_path_buf()),
            None => EventSource::Stdin,
        }
    }

    /// Human-readable name used in diagnostics
    pub fn origin(&self) -> String {
        match self {
            EventSource::File(path) => path.display().to_string(),
            EventSource::Stdin => String::from("<stdin>"),
        }
    }

    /// Open the source and return an iterator of decoded events
    pub fn open(&self) -> Result<EventReader<Box<dyn BufRead>>> {
        let reader: Box<dyn BufRead> = match self {
            EventSource::File(path) => {
                let file = File::open(path).map_err(|source| ReportError::SourceOpen {
                    path: path.clone(),
                    source,
                })?;
                Box::new(BufReader::new(file))
            }
            EventSource::Stdin => Box::new(io::stdin().lock()),
        };

        debug!("Reading events from {}", self.origin());
        Ok(EventReader::new(reader, self.origin()))
    }
}

/// Decodes events line by line from any buffered reader.
///
/// Yields an error and then stops on the first read or decode failure.
pub struct EventReader<R> {
    reader: R,
    buffer: Vec<u8>,
    origin: String,
    line_number: usize,
    failed: bool,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            origin: origin.into(),
            line_number: 0,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    self.failed = true;
                    return Some(Err(ReportError::SourceRead {
                        origin: self.origin.clone(),
                        source,
                    }));
                }
            }
            self.line_number += 1;

            // Bytes are decoded as-is so invalid UTF-8 surfaces as a decode error
            let line = self.buffer.trim_ascii();
            if line.is_empty() {
                debug!("Skipping blank line {}", self.line_number);
                continue;
            }

            let decoded = decode_slice(self.line_number, line).map_err(ReportError::from);
            self.failed = decoded.is_err();
            return Some(decoded);
        }
    }
}
