//! Document transformation

mod standard_transformer;

pub use standard_transformer::StandardTransformer;

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder used by tokenize and detokenize when none is configured
pub const DEFAULT_TOKEN: &str = "[TOKEN]";

/// Literal that replaces every redacted phrase
pub const REDACTION_MARKER: &str = "[redacted]";

/// Transformation mode, selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Replace every word in the document with the token
    Tokenize,

    /// Replace token occurrences with their whitespace-trimmed form.
    ///
    /// Tokenize keeps no record of the words it replaced, so this does not
    /// recover them. Reversal would need a position-indexed mapping from each
    /// token occurrence back to the original fragment, stored alongside the
    /// output; no such mapping is produced.
    Detokenize,

    /// Replace PII and SPII phrases with [`REDACTION_MARKER`]
    Redact,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Tokenize, Mode::Detokenize, Mode::Redact];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Tokenize => "tokenize",
            Mode::Detokenize => "detokenize",
            Mode::Redact => "redact",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tokenize" => Ok(Mode::Tokenize),
            "detokenize" => Ok(Mode::Detokenize),
            "redact" => Ok(Mode::Redact),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// Trait for transforming a document
pub trait Transformer: Send + Sync {
    /// Produce a new document; the input is never modified
    fn transform(&self, document: &[u8], mode: Mode) -> Vec<u8>;

    /// The token used by tokenize and detokenize
    fn token(&self) -> &str;
}

/// Configuration for a transformer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformerConfig {
    /// Literal substituted for every word in tokenize mode
    pub token: String,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            token: DEFAULT_TOKEN.to_string(),
        }
    }
}
