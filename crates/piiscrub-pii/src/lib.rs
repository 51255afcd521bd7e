//! piiscrub PII Detection and Transformation
//!
//! This crate provides the pattern-matching engine behind piiscrub:
//! - PII and SPII phrase detection over raw document bytes
//! - Three transformation modes (tokenize, detokenize, redact)
//! - Pattern sets as explicit values, so callers can swap in their own

pub mod detector;
pub mod engine;
pub mod error;
pub mod patterns;
pub mod transformer;

pub use detector::{Detection, DetectionSummary, Detector, RegexDetector};
pub use engine::{Engine, Processed};
pub use error::{Error, Result};
pub use patterns::{Category, PatternSet, PatternSources};
pub use transformer::{
    DEFAULT_TOKEN, Mode, REDACTION_MARKER, StandardTransformer, Transformer, TransformerConfig,
};
