//! Error types for tessel.
//!
//! Fatal conditions (unreadable files, malformed statements, missing
//! prerequisites) are reported through [`MeshError`]. Recoverable conditions
//! such as an unknown material name or an output option without backing data
//! are logged and resolved in place instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A file could not be opened for reading or writing.
    #[error("can't open {path}: {source}")]
    FileOpen {
        /// The file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line did not match any recognized grammar.
    #[error("{path}:{line}: {message}")]
    Malformed {
        /// The file being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three corners.
    #[error("face {face} has {len} corners, at least 3 are required")]
    InvalidFace {
        /// The face index.
        face: usize,
        /// Number of corners found.
        len: usize,
    },

    /// An operation was invoked before the data it derives from exists.
    #[error("{operation} requires {attribute}")]
    MissingAttribute {
        /// The attribute that is missing.
        attribute: &'static str,
        /// The operation that needed it.
        operation: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a file-open error for `path`.
    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeshError::FileOpen {
            path: path.into(),
            source,
        }
    }
}
