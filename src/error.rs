use std::path::PathBuf;

use thiserror::Error;

/// Result type for zone analysis operations
pub type Result<T> = std::result::Result<T, ZonesError>;

/// Errors that can occur while analyzing a document
#[derive(Error, Debug)]
pub enum ZonesError {
    /// Invalid configuration (n-gram level, chunk size, top_k, config file)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Internal invariant violated while computing TF-IDF
    #[error("engine invariant violated in chunk {chunk} (term {term:?}): {reason}")]
    Engine {
        term: String,
        chunk: usize,
        reason: String,
    },

    /// Failed to read an input file or directory
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory mode found nothing to analyze
    #[error("no .txt files found in {}", .0.display())]
    NoDocuments(PathBuf),
}

impl ZonesError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an engine error carrying the offending term and chunk index
    pub fn engine(term: impl Into<String>, chunk: usize, reason: impl Into<String>) -> Self {
        Self::Engine {
            term: term.into(),
            chunk,
            reason: reason.into(),
        }
    }

    /// Create an I/O error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
