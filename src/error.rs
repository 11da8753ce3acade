use thiserror::Error;

use crate::corpus::Representation;

/// Errors returned by the clustering engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The corpus holds no documents.
    #[error("empty corpus")]
    EmptyCorpus,

    /// Two compared vectors have different lengths.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Length of the first vector.
        expected: usize,
        /// Length of the second vector.
        found: usize,
    },

    /// A document lacks the vector representation the engine was configured for.
    #[error("document {index} has no {representation} vector")]
    MissingRepresentation {
        /// Index of the offending document.
        index: usize,
        /// The requested representation.
        representation: Representation,
    },

    /// Invalid construction or estimation parameter.
    #[error("invalid configuration {name}: {message}")]
    InvalidConfiguration {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: String,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            name,
            message: message.into(),
        }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
