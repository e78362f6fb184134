use std::path::PathBuf;

use thiserror::Error;

/// Hard failures raised by the library.
///
/// Soft conditions (an empty message, an empty value list) are never surfaced
/// here: operations report them as `Ok(None)` after logging a notice, so
/// callers can tell "nothing to do" apart from "something went wrong".
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No connection was supplied and neither the default slot nor the
    /// environment provides one.
    #[error("not configured: {0}")]
    NotConfigured(&'static str),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("no plot is currently displayed")]
    NoPlotAvailable,

    #[error("empty input")]
    EmptyInput,

    /// Transport-level failure from the HTTP client. Never retried; passed
    /// through verbatim for the caller to decide what to do.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
