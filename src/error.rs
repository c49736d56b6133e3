//! Error handling for the jpack library.
//!
//! Every engine surfaces failures through the [`Error`] enum below; nothing is
//! recovered internally. The CLI boundary in `main.rs` translates an `Error`
//! into a line on stderr and a non-zero exit code.

use thiserror::Error;

/// Main error type for the jpack library.
#[derive(Error, Debug)]
pub enum Error {
    /// The bit source yielded fewer bits than a contracted read demanded.
    #[error("unexpected end of compressed stream")]
    Truncated,

    /// Structurally invalid data: a block header without content, invalid hex
    /// in a header, or an inconsistent serialised tree.
    #[error("malformed data: {message}")]
    Malformed {
        /// Description of the structural problem.
        message: String,
    },

    /// The input file does not exist.
    #[error("file '{path}' not found")]
    NotFound {
        /// Path that could not be opened.
        path: String,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command line arguments are wrong.
    #[error("usage error: {message}")]
    Usage {
        /// What was wrong with the invocation.
        message: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Malformed`] with the given message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::Malformed {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
