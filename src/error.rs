// Error taxonomy for reading, decoding and reporting

use crate::event::DecodeError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of a report run
#[derive(Debug, Error)]
pub enum ReportError {
    /// The named event file could not be opened
    #[error("error opening file {}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure while reading the event stream
    #[error("error reading events from {origin}")]
    SourceRead {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Writing echoed output or the report failed
    #[error("error writing report output")]
    Write(#[source] io::Error),
}

pub type Result<T, E = ReportError> = std::result::Result<T, E>;
