//! Reading documents from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::convert::convert;

/// Errors surfaced while loading a document from disk.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The file could not be read (missing, unreadable, or not UTF-8).
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads a Markdown file and converts its contents to an HTML fragment.
///
/// Read failures propagate unmodified; conversion itself cannot fail.
pub fn convert_file(path: impl AsRef<Path>) -> Result<String, ReadError> {
    let path = path.as_ref();
    let document = fs::read_to_string(path)?;
    log::debug!("read {} bytes from {}", document.len(), path.display());
    Ok(convert(&document))
}
