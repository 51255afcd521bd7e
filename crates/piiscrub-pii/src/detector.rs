//! PII/SPII detectors

mod regex_detector;

pub use regex_detector::RegexDetector;

use crate::patterns::Category;
use serde::{Deserialize, Serialize};

/// A matched span in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Category of the pattern that matched
    pub category: Category,

    /// Start byte offset in the document
    pub start: usize,

    /// End byte offset in the document (exclusive)
    pub end: usize,

    /// The matched text, lossily decoded as UTF-8
    pub text: String,
}

/// Match counts per category, reported before a document is transformed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub pii: usize,
    pub spii: usize,
}

impl DetectionSummary {
    /// Count for a single category
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Pii => self.pii,
            Category::Spii => self.spii,
        }
    }

    /// Sum of both categories; overlapping spans are counted once per category
    pub fn total(&self) -> usize {
        self.pii + self.spii
    }
}

/// Trait for detecting PII and SPII in a document
pub trait Detector: Send + Sync {
    /// All matches of every category, sorted by start offset
    fn detect(&self, document: &[u8]) -> Vec<Detection>;

    /// Number of non-overlapping matches for one category
    fn count(&self, document: &[u8], category: Category) -> usize;

    /// Counts for both categories
    fn summarize(&self, document: &[u8]) -> DetectionSummary {
        DetectionSummary {
            pii: self.count(document, Category::Pii),
            spii: self.count(document, Category::Spii),
        }
    }
}
