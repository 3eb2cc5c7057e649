//! Error types for reading, editing, and configuring source files

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while loading or rewriting a file
#[derive(Error, Debug)]
pub enum DocgenError {
    /// The file named by a symbol path (or on the command line) does not exist
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Reading or writing the file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be parsed or holds an invalid value
    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl DocgenError {
    /// Classify an I/O failure on `path`, keeping "not found" distinct.
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            DocgenError::NotFound { path: path.to_path_buf() }
        } else {
            DocgenError::Io { path: path.to_path_buf(), source }
        }
    }

    pub fn config(path: &Path, message: impl Into<String>) -> Self {
        DocgenError::Config { path: path.to_path_buf(), message: message.into() }
    }
}

/// Result type for docgen operations
pub type Result<T> = std::result::Result<T, DocgenError>;
