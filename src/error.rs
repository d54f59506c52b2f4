//! Error types for the PDF stamp library

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF stamp library
#[derive(Error, Debug)]
pub enum Error {
    /// Input buffer could not be parsed as a PDF
    #[error("failed to decode PDF: {0}")]
    Decode(#[source] lopdf::Error),

    /// Document has no page at the requested index
    #[error("PDF has no pages")]
    MissingPage,

    /// Scale factor must be positive and finite
    #[error("invalid scale factor: {0}")]
    InvalidScale(f32),

    /// Mutated document could not be re-serialized
    #[error("failed to encode merged PDF: {0}")]
    Encode(#[source] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Structurally broken document (parsed, but the page tree is unusable)
    #[error("{0}")]
    Malformed(String),
}
