//! JSON serialization for annotation documents.
//!
//! The JSON layout matches the interchange format the inline notation was
//! designed around: `text`, `denotations` (with `span.begin`/`span.end`),
//! `relations`, and `config."entity types"`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::AnnomarkError;
use crate::model::Document;

/// Reads a document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_document(path: &Path) -> Result<Document, AnnomarkError> {
    let file = File::open(path).map_err(AnnomarkError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| AnnomarkError::DocumentParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a document to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_document(path: &Path, doc: &Document) -> Result<(), AnnomarkError> {
    let file = File::create(path).map_err(AnnomarkError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, doc).map_err(|source| AnnomarkError::DocumentWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a document from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Document, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes a document to a pretty-printed JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}
