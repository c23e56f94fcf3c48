//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("malformed font: {0}")]
    MalformedFont(String),

    #[error("font has no subfamily name record")]
    MissingSubfamily,

    #[error("name contains unsupported characters: {0:?}")]
    UnsafeName(String),

    #[error("unknown subset: {0}")]
    UnknownSubset(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
