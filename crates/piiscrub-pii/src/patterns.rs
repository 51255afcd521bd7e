//! PII and SPII pattern sets
//!
//! A [`PatternSet`] holds one compiled regex per [`Category`]. Two default
//! sets exist: the broad detection set, which also captures a one-word
//! qualifier in front of the phrase ("home address code", "my SSN"), and the
//! narrower phrase-only redaction set. Both are built explicitly and handed to
//! the detector and transformer.

use crate::error::{Error, Result};
use regex::bytes::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad PII pattern used for detection counts
pub const DETECT_PII: &str = concat!(
    r"\b(?:[a-z]+\s)?(?:SSN|social security number|driver's license|passport|credit card|debit card|bank account)\b",
    r"|\b(?:[a-z]+\s)?(?:first|last|middle|maiden|previous|current)\s?(?:name|initials)\b",
    r"|\b(?:[a-z]+\s)?(?:phone|fax|email|address|city|state|zip|postal)\s?(?:number|code)\b",
);

/// Broad SPII pattern used for detection counts
pub const DETECT_SPII: &str = concat!(
    r"\b(?:[a-z]+\s)?(?:medical|health|insurance|benefits|prescription|treatment)\s?(?:information|record)\b",
    r"|\b(?:[a-z]+\s)?(?:ethnicity|race|sexual|gender|religion)\s?(?:identity|orientation)\b",
);

/// Phrase-only PII pattern used by redact mode
pub const REDACT_PII: &str =
    r"\b(?:SSN|social security number|driver's license|passport|credit card|debit card|bank account)\b";

/// Phrase-only SPII pattern used by redact mode
pub const REDACT_SPII: &str =
    r"\b(?:medical|health|insurance|benefits|prescription|treatment)\s?(?:information|record)\b";

/// Category of sensitive information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Personally identifiable information
    Pii,

    /// Sensitive personally identifiable information
    Spii,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Pii, Category::Spii];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Pii => f.write_str("PII"),
            Category::Spii => f.write_str("SPII"),
        }
    }
}

/// Uncompiled regex sources for a pattern set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSources {
    /// PII regex source
    pub pii: String,

    /// SPII regex source
    pub spii: String,
}

impl PatternSources {
    /// Sources of the default detection set
    pub fn detection() -> Self {
        Self {
            pii: DETECT_PII.to_string(),
            spii: DETECT_SPII.to_string(),
        }
    }

    /// Sources of the default redaction set
    pub fn redaction() -> Self {
        Self {
            pii: REDACT_PII.to_string(),
            spii: REDACT_SPII.to_string(),
        }
    }

    fn get(&self, category: Category) -> &str {
        match category {
            Category::Pii => &self.pii,
            Category::Spii => &self.spii,
        }
    }
}

/// Compiled, case-insensitive pattern per category
#[derive(Debug, Clone)]
pub struct PatternSet {
    pii: Regex,
    spii: Regex,
}

impl PatternSet {
    /// Compile a pattern set from its sources
    pub fn compile(sources: &PatternSources) -> Result<Self> {
        Ok(Self {
            pii: compile_one(sources, Category::Pii)?,
            spii: compile_one(sources, Category::Spii)?,
        })
    }

    /// The default detection set
    pub fn detection() -> Result<Self> {
        Self::compile(&PatternSources::detection())
    }

    /// The default redaction set
    pub fn redaction() -> Result<Self> {
        Self::compile(&PatternSources::redaction())
    }

    /// Compiled regex for a category
    pub fn regex(&self, category: Category) -> &Regex {
        match category {
            Category::Pii => &self.pii,
            Category::Spii => &self.spii,
        }
    }
}

fn compile_one(sources: &PatternSources, category: Category) -> Result<Regex> {
    RegexBuilder::new(sources.get(category))
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::InvalidPattern { category, source })
}
