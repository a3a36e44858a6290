use thiserror::Error;

/// Errors that abort a conversion.
///
/// Every variant carries a single human-readable message; a failed conversion
/// never leaves partial output behind.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// No parser/generator (or codec) is registered for the requested pair.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Malformed JSON, or XML without a usable root element.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The source could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An image or audio codec failed.
    #[error("Encode error: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Parse(err.to_string())
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, ConvertError>;
