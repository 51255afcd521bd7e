//! Detector and transformer paired for one document at a time

use crate::detector::{DetectionSummary, Detector, RegexDetector};
use crate::error::Result;
use crate::patterns::{PatternSet, PatternSources};
use crate::transformer::{Mode, StandardTransformer, Transformer, TransformerConfig};
use std::sync::Arc;

/// Result of processing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// Match counts taken before the transformation ran
    pub summary: DetectionSummary,

    /// The transformed document
    pub output: Vec<u8>,
}

/// Runs detection for reporting, then the selected transformation.
///
/// The transformer never sees the detector's results; redact mode runs its
/// own narrower patterns.
#[derive(Clone)]
pub struct Engine {
    detector: Arc<dyn Detector>,
    transformer: Arc<dyn Transformer>,
}

impl Engine {
    pub fn new(detector: Arc<dyn Detector>, transformer: Arc<dyn Transformer>) -> Self {
        Self {
            detector,
            transformer,
        }
    }

    /// Build an engine from pattern sources and a transformer configuration
    pub fn from_sources(
        detection: &PatternSources,
        redaction: &PatternSources,
        config: TransformerConfig,
    ) -> Result<Self> {
        let detector = RegexDetector::new(Arc::new(PatternSet::compile(detection)?));
        let transformer =
            StandardTransformer::new(config, Arc::new(PatternSet::compile(redaction)?))?;

        Ok(Self::new(Arc::new(detector), Arc::new(transformer)))
    }

    /// Engine over the default pattern sets
    pub fn with_defaults(config: TransformerConfig) -> Result<Self> {
        Self::from_sources(
            &PatternSources::detection(),
            &PatternSources::redaction(),
            config,
        )
    }

    pub fn detector(&self) -> &dyn Detector {
        self.detector.as_ref()
    }

    pub fn transformer(&self) -> &dyn Transformer {
        self.transformer.as_ref()
    }

    /// Count matches, then transform
    pub fn process(&self, document: &[u8], mode: Mode) -> Processed {
        let summary = self.detector.summarize(document);
        let output = self.transformer.transform(document, mode);

        Processed { summary, output }
    }

    /// Like [`Engine::process`], with the mode given by name
    pub fn process_named(&self, document: &[u8], mode: &str) -> Result<Processed> {
        let mode = mode.parse::<Mode>()?;
        Ok(self.process(document, mode))
    }
}
