//! Error types for the piiscrub engine

use crate::patterns::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown mode: {0} (expected tokenize, detokenize or redact)")]
    UnknownMode(String),

    #[error("Invalid {category} pattern: {source}")]
    InvalidPattern {
        category: Category,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid token '{token}': {source}")]
    InvalidToken {
        token: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
