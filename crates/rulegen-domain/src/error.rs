//! Error handling types

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the transfer rule generator
///
/// Only structural and environmental failures are raised. Problems with an
/// individual rule are recorded through the report sink instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error on a specific file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being read or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML in a specification or transfer file
    #[error("XML parse error in {document}: {message}")]
    Xml {
        /// File path or other description of the document
        document: String,
        /// Description of the parse failure
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Linguistic database could not be loaded or is inconsistent
    #[error("Linguistic database error: {message}")]
    Database {
        /// Description of the database error
        message: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },
}

impl Error {
    /// Create an I/O error tied to a path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an XML parse error
    pub fn xml(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Xml {
            document: document.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Whether this error came from malformed XML
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Xml { .. })
    }
}
