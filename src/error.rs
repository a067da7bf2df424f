use std::path::PathBuf;
use thiserror::Error;

/// The main error type for annomark operations.
#[derive(Debug, Error)]
pub enum AnnomarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse document JSON from {path}: {source}")]
    DocumentParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write document JSON to {path}: {source}")]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding requires a text field; everything else degrades silently.
    #[error("The \"text\" key is missing.")]
    MissingText,
}
