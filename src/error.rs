//! Error taxonomy for the solver.
//!
//! All variants are fatal and are raised before a search begins:
//! a run either starts with a fully validated [`CostModel`] and
//! configuration, or it does not start at all. Recoverable conditions
//! inside the engines (an offspring with duplicate hubs, for example)
//! are repaired in place and never surface here.
//!
//! [`CostModel`]: crate::model::CostModel

use std::fmt;
use std::path::PathBuf;

/// A type alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal solver error.
#[derive(Debug)]
pub enum Error {
    /// An input source could not be read.
    Io {
        /// Path of the unreadable source.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Matrix content was malformed: ragged row, wrong dimension,
    /// non-numeric or negative field.
    Format(String),

    /// Invalid problem setup: matrix dimension mismatch, `alpha`
    /// outside `[0, 1]`, hub count outside `[1, n)`, or engine
    /// parameters that make a search meaningless.
    Configuration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            Error::Format(msg) => write!(f, "malformed matrix: {msg}"),
            Error::Configuration(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] with a formatted message.
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Shorthand for a [`Error::Format`] with a formatted message.
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }
}
