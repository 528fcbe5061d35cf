//! Document loading: path or raw bytes to a parsed XML tree.

use std::fs;
use std::io;
use std::path::Path;

use roxmltree::Document;
use tracing::info;

use crate::error::{LoadError, Result};

use super::version::detect_version;

/// Read a source file into memory.
///
/// A missing file reports `NotFound`; every other I/O or encoding failure
/// (permissions, invalid UTF-8) reports `Read`, so batch drivers can tell
/// the two apart.
pub fn read_source(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(LoadError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(LoadError::Read(e)),
    }
}

/// Decode a raw byte stream as UTF-8 XML text.
pub fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|e| LoadError::Read(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Parse XML text into a document tree.
///
/// Malformed content is fatal for this document only; the error keeps the
/// parser's position and message.
pub fn parse(xml: &str) -> Result<Document<'_>> {
    let doc = Document::parse(xml)?;
    info!("CFDI version {} loaded", detect_version(doc.root_element()));
    Ok(doc)
}
