//! Error types for the cfdix-core library.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that can occur while loading a CFDI document.
///
/// Loading is the only fallible stage of the pipeline: extraction is total
/// over a parsed tree, so missing elements and attributes become defaults
/// or `None`, never errors. A load failure aborts processing of that single
/// document only.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source path does not resolve to an existing file.
    #[error("no such file: {0}")]
    NotFound(PathBuf),

    /// The content is not well-formed XML. Carries the parser's position
    /// and message for diagnostics.
    #[error("malformed XML: {0}")]
    Malformed(#[from] roxmltree::Error),

    /// Any other I/O-layer failure (permissions, encoding).
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),
}

impl LoadError {
    /// Short failure-kind label for batch reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::NotFound(_) => "not_found",
            LoadError::Malformed(_) => "malformed_xml",
            LoadError::Read(_) => "read_error",
        }
    }
}

/// Result type for the cfdix library.
pub type Result<T> = std::result::Result<T, LoadError>;
