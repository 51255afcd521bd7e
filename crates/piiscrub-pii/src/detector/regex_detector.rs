//! Regex-based detector implementation

use crate::detector::{Detection, Detector};
use crate::error::Result;
use crate::patterns::{Category, PatternSet};
use std::sync::Arc;

/// Detector that counts matches of a [`PatternSet`]
#[derive(Debug, Clone)]
pub struct RegexDetector {
    patterns: Arc<PatternSet>,
}

impl RegexDetector {
    /// Create a detector over the given pattern set
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self { patterns }
    }

    /// Create a detector over the default detection set
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(Arc::new(PatternSet::detection()?)))
    }

    /// The pattern set this detector matches against
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }
}

impl Detector for RegexDetector {
    fn detect(&self, document: &[u8]) -> Vec<Detection> {
        let mut detections = Vec::new();

        // Each category is matched on its own, so spans may overlap across categories
        for category in Category::ALL {
            for found in self.patterns.regex(category).find_iter(document) {
                detections.push(Detection {
                    category,
                    start: found.start(),
                    end: found.end(),
                    text: String::from_utf8_lossy(found.as_bytes()).into_owned(),
                });
            }
        }

        detections.sort_by_key(|d| d.start);

        detections
    }

    fn count(&self, document: &[u8], category: Category) -> usize {
        self.patterns.regex(category).find_iter(document).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::DetectionSummary;
    use crate::patterns::PatternSources;

    #[test]
    fn test_counts_per_category() {
        let detector = RegexDetector::with_defaults().unwrap();
        let text = b"Name: first name, last name. SSN: 123-45-6789. Health record on file.";

        assert_eq!(detector.count(text, Category::Pii), 3);
        assert_eq!(detector.count(text, Category::Spii), 1);
        assert_eq!(
            detector.summarize(text),
            DetectionSummary { pii: 3, spii: 1 }
        );
    }

    #[test]
    fn test_no_matches_in_plain_text() {
        let detector = RegexDetector::with_defaults().unwrap();
        let text = b"The quick brown fox jumps over the lazy dog.";

        assert_eq!(detector.summarize(text), DetectionSummary::default());
        assert!(detector.detect(text).is_empty());
    }

    #[test]
    fn test_matches_are_non_overlapping_within_category() {
        let detector = RegexDetector::with_defaults().unwrap();

        // The leading qualifier swallows the second "SSN", leaving two matches
        let text = b"SSN SSN SSN";
        let detections = detector.detect(text);

        assert_eq!(detector.count(text, Category::Pii), 2);
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].text, "SSN SSN");
        assert_eq!(detections[1].text, "SSN");
        assert!(detections[0].end <= detections[1].start);
    }

    #[test]
    fn test_categories_may_overlap() {
        let detector = RegexDetector::with_defaults().unwrap();
        let text = b"gender identity passport";
        let detections = detector.detect(text);

        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].category, Category::Spii);
        assert_eq!(detections[0].text, "gender identity");
        assert_eq!(detections[1].category, Category::Pii);
        assert_eq!(detections[1].text, "identity passport");
        // "identity" belongs to both spans
        assert!(detections[1].start < detections[0].end);
    }

    #[test]
    fn test_detections_sorted_by_start() {
        let detector = RegexDetector::with_defaults().unwrap();
        let text = b"treatment information, then zip code, then bank account";
        let detections = detector.detect(text);

        assert_eq!(detections.len(), 3);
        for i in 1..detections.len() {
            assert!(detections[i].start >= detections[i - 1].start);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let detector = RegexDetector::with_defaults().unwrap();

        assert_eq!(detector.count(b"PASSPORT", Category::Pii), 1);
        assert_eq!(detector.count(b"Medical Record", Category::Spii), 1);
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let detector = RegexDetector::with_defaults().unwrap();
        let text = b"\xff\xfe passport \xff";

        assert_eq!(detector.count(text, Category::Pii), 1);
    }

    #[test]
    fn test_alternate_pattern_set() {
        let sources = PatternSources {
            pii: r"\bbadge\b".to_string(),
            spii: r"\bblood type\b".to_string(),
        };
        let detector = RegexDetector::new(Arc::new(PatternSet::compile(&sources).unwrap()));
        let text = b"Badge 42, blood type O, passport 1234";

        assert_eq!(detector.summarize(text), DetectionSummary { pii: 1, spii: 1 });
    }
}
