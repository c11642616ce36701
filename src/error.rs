//! Error type shared by the parser, chord library and renderer.

use std::path::PathBuf;

use crate::model::DirectiveKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A chord listed in the legend has no entry in the chord library.
    #[error("unknown chord: {name}")]
    UnknownChord { name: String },
    /// A chord definition breaks one of the diagram invariants.
    #[error("invalid chord '{name}': {reason}")]
    InvalidChord { name: String, reason: String },
    /// The directive keyword is present but the line does not have the
    /// `leader{kind:payload}trailer` shape.
    #[error("malformed {kind} directive on line {line}")]
    MalformedDirective { line: usize, kind: DirectiveKind },
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid UTF-8 in input: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
