//! Error types for the pdf-debrand library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pdf-debrand library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Malformed page-skip list
    #[error("Invalid skip list: {0}")]
    InvalidOffsetList(String),

    /// Degenerate branding rectangle
    #[error("Invalid rectangle: {0}")]
    InvalidRect(String),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Every page was skipped; nothing to write
    #[error("no pages left to write after applying the skip list")]
    NoPagesToWrite,

    /// Page rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// General error
    #[error("{0}")]
    General(String),
}
