//! Error types for sqlb

use thiserror::Error;

/// Result type alias for sqlb operations
pub type SqlbResult<T> = Result<T, SqlbError>;

/// Errors reported while delivering rendered SQL to an external sink.
///
/// Building and rendering into the internal buffer cannot fail; the only
/// failure surface is the writer handed to [`Builder::write_to`] or
/// [`Builder::write_fmt_to`].
///
/// [`Builder::write_to`]: crate::Builder::write_to
/// [`Builder::write_fmt_to`]: crate::Builder::write_fmt_to
#[derive(Debug, Error)]
pub enum SqlbError {
    /// An `io::Write` sink failed.
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `fmt::Write` sink failed.
    #[error("Sink format error")]
    Fmt(#[from] std::fmt::Error),
}

impl SqlbError {
    /// Check if this error came from an `io::Write` sink
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
