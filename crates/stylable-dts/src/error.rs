//! Error types for declaration generation.
//!
//! Copyright (c) 2025 Posit, PBC

use stylable_source_map::SourceMapError;
use thiserror::Error;

/// Errors that can occur while generating declarations
#[derive(Debug, Error)]
pub enum DtsError {
    /// The compiled stylesheet is missing structural data or carries values
    /// that cannot be addressed (e.g. a zero line number)
    #[error("invalid stylesheet metadata: {message}")]
    InvalidMetadata { message: String },

    /// Source map encoding broke an internal invariant
    #[error(transparent)]
    SourceMap(#[from] SourceMapError),
}

impl DtsError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        DtsError::InvalidMetadata {
            message: message.into(),
        }
    }
}
