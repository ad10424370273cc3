// Error taxonomy for document construction, parsing and detectors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure raised by a syntax parser implementation
#[derive(Debug, Error)]
pub enum ParseError {
    /// The parser backend could not be loaded or reached
    #[error("syntax parser unavailable: {0}")]
    Unavailable(String),
    /// The backend rejected the input text
    #[error("syntax parser rejected input: {0}")]
    InvalidInput(String),
    /// The backend returned token indices that do not fit its own output
    #[error("syntax parser returned a malformed parse: {0}")]
    Malformed(String),
}

/// Top-level error for the analysis pipeline
#[derive(Debug, Error)]
pub enum BiasError {
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `origin` is the file path, or `<text>` for in-memory input
    #[error("{origin} is not readable text: {reason}")]
    Decode { origin: String, reason: String },

    #[error("detector '{detector}' failed: {source}")]
    DetectorFailure {
        detector: String,
        #[source]
        source: ParseError,
    },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("failed to compile pattern: {0}")]
    Pattern(String),

    #[error("cannot load word list {}: {source}", path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: Box<BiasError>,
    },
}

impl BiasError {
    /// Wrap a parser failure with the name of the detector that hit it
    pub fn detector_failure(detector: impl Into<String>, source: ParseError) -> Self {
        BiasError::DetectorFailure {
            detector: detector.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BiasError>;
