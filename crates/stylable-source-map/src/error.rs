//! Error types for source map operations.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a source map
#[derive(Debug, Error)]
pub enum SourceMapError {
    /// An internal invariant was broken while encoding mappings.
    ///
    /// Generation is deterministic, so this always indicates a bug in the
    /// caller that produced the entries.
    #[error("source map encoding failed: {message}")]
    Encoding { message: String },

    /// The `mappings` string (or the surrounding document) is malformed
    #[error("source map decoding failed: {message}")]
    Decoding { message: String },

    #[error("invalid source map JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SourceMapError {
    pub(crate) fn encoding(message: impl Into<String>) -> Self {
        SourceMapError::Encoding {
            message: message.into(),
        }
    }

    pub(crate) fn decoding(message: impl Into<String>) -> Self {
        SourceMapError::Decoding {
            message: message.into(),
        }
    }
}
