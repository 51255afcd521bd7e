//! Standard transformer implementation

use crate::error::{Error, Result};
use crate::patterns::{Category, PatternSet};
use crate::transformer::{Mode, REDACTION_MARKER, Transformer, TransformerConfig};
use once_cell::sync::Lazy;
use regex::bytes::{NoExpand, Regex};
use std::sync::Arc;

/// Maximal run of word characters: letters, digits, underscore
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").unwrap());

/// Transformer for all three modes
#[derive(Debug, Clone)]
pub struct StandardTransformer {
    config: TransformerConfig,
    token_regex: Regex,
    redaction: Arc<PatternSet>,
}

impl StandardTransformer {
    /// Create a transformer that redacts with the given pattern set
    pub fn new(config: TransformerConfig, redaction: Arc<PatternSet>) -> Result<Self> {
        // The token is matched literally, never as a pattern
        let token_regex = Regex::new(&format!(r"\b{}\b", regex::escape(&config.token)))
            .map_err(|source| Error::InvalidToken {
                token: config.token.clone(),
                source,
            })?;

        Ok(Self {
            config,
            token_regex,
            redaction,
        })
    }

    /// Create a transformer over the default redaction set
    pub fn with_defaults(config: TransformerConfig) -> Result<Self> {
        Self::new(config, Arc::new(PatternSet::redaction()?))
    }

    fn tokenize(&self, document: &[u8]) -> Vec<u8> {
        WORD_REGEX
            .replace_all(document, NoExpand(self.config.token.as_bytes()))
            .into_owned()
    }

    fn detokenize(&self, document: &[u8]) -> Vec<u8> {
        // Every match is the token itself, so its trimmed form is fixed.
        // `str::trim` strips Unicode White_Space, not just ASCII.
        let trimmed = self.config.token.trim();
        self.token_regex
            .replace_all(document, NoExpand(trimmed.as_bytes()))
            .into_owned()
    }

    fn redact(&self, document: &[u8]) -> Vec<u8> {
        let marker = REDACTION_MARKER.as_bytes();

        // PII first, then SPII over the PII-redacted text
        let without_pii = self
            .redaction
            .regex(Category::Pii)
            .replace_all(document, NoExpand(marker));
        self.redaction
            .regex(Category::Spii)
            .replace_all(&without_pii, NoExpand(marker))
            .into_owned()
    }
}

impl Transformer for StandardTransformer {
    fn transform(&self, document: &[u8], mode: Mode) -> Vec<u8> {
        match mode {
            Mode::Tokenize => self.tokenize(document),
            Mode::Detokenize => self.detokenize(document),
            Mode::Redact => self.redact(document),
        }
    }

    fn token(&self) -> &str {
        &self.config.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternSources;

    fn transformer(token: &str) -> StandardTransformer {
        StandardTransformer::with_defaults(TransformerConfig {
            token: token.to_string(),
        })
        .unwrap()
    }

    fn run(t: &StandardTransformer, text: &str, mode: Mode) -> String {
        String::from_utf8(t.transform(text.as_bytes(), mode)).unwrap()
    }

    #[test]
    fn test_tokenize_replaces_every_word() {
        let t = transformer("***");

        assert_eq!(run(&t, "Hello world", Mode::Tokenize), "*** ***");
    }

    #[test]
    fn test_tokenize_preserves_non_word_characters() {
        let t = transformer("T");

        assert_eq!(
            run(&t, "Hi, Bob!\n\t42_x.  (ok)", Mode::Tokenize),
            "T, T!\n\tT.  (T)"
        );
    }

    #[test]
    fn test_tokenize_is_not_limited_to_pii() {
        let t = transformer("[TOKEN]");

        assert_eq!(
            run(&t, "weather: sunny", Mode::Tokenize),
            "[TOKEN]: [TOKEN]"
        );
    }

    #[test]
    fn test_tokenize_token_is_literal() {
        let t = transformer("$0");

        assert_eq!(run(&t, "a b", Mode::Tokenize), "$0 $0");
    }

    #[test]
    fn test_tokenize_unicode_words() {
        let t = transformer("T");

        assert_eq!(run(&t, "naïve café", Mode::Tokenize), "T T");
    }

    #[test]
    fn test_tokenize_passes_invalid_utf8_through() {
        let t = transformer("T");

        assert_eq!(t.transform(b"\xff abc \xfe", Mode::Tokenize), b"\xff T \xfe");
    }

    #[test]
    fn test_detokenize_leaves_tokens_in_place() {
        let t = transformer("TOK");
        let text = "TOK, TOKEN TOK";

        assert_eq!(run(&t, text, Mode::Detokenize), text);
    }

    #[test]
    fn test_detokenize_default_token_is_identity() {
        let t = transformer("[TOKEN]");
        let text = "[TOKEN] [TOKEN], [TOKEN].";

        assert_eq!(run(&t, text, Mode::Detokenize), text);
    }

    #[test]
    fn test_detokenize_does_not_reverse_tokenize() {
        let t = transformer("[TOKEN]");
        let original = "Call John about the passport";

        let tokenized = t.transform(original.as_bytes(), Mode::Tokenize);
        let detokenized = t.transform(&tokenized, Mode::Detokenize);

        // The erased words are gone for good
        assert_ne!(detokenized, original.as_bytes());
        assert_eq!(detokenized, tokenized);
        assert_eq!(
            String::from_utf8(detokenized).unwrap(),
            "[TOKEN] [TOKEN] [TOKEN] [TOKEN] [TOKEN]"
        );
    }

    #[test]
    fn test_detokenize_round_trip_only_when_document_is_all_tokens() {
        let t = transformer("X");
        let original = "X X, X";

        let tokenized = t.transform(original.as_bytes(), Mode::Tokenize);
        let detokenized = t.transform(&tokenized, Mode::Detokenize);

        assert_eq!(detokenized, original.as_bytes());
    }

    #[test]
    fn test_detokenize_trims_whitespace_in_token() {
        let t = transformer(" a.b");

        // The token is matched literally: " axb" is left alone
        assert_eq!(run(&t, "z a.b z axb", Mode::Detokenize), "za.b z axb");
    }

    #[test]
    fn test_detokenize_trims_unicode_whitespace() {
        let nbsp = transformer("\u{a0}x");
        assert_eq!(run(&nbsp, "a\u{a0}x b", Mode::Detokenize), "ax b");

        let vtab = transformer("x\u{b}");
        assert_eq!(run(&vtab, "x\u{b}b c", Mode::Detokenize), "xb c");
    }

    #[test]
    fn test_redact_ssn_phrase_only() {
        let t = transformer("[TOKEN]");

        assert_eq!(
            run(&t, "My SSN is 123-45-6789", Mode::Redact),
            "My [redacted] is 123-45-6789"
        );
    }

    #[test]
    fn test_redact_medical_record() {
        let t = transformer("[TOKEN]");

        assert_eq!(
            run(&t, "Patient medical record attached", Mode::Redact),
            "Patient [redacted] attached"
        );
    }

    #[test]
    fn test_redact_pii_and_spii() {
        let t = transformer("[TOKEN]");

        assert_eq!(
            run(
                &t,
                "CREDIT CARD and bank account, plus prescription information.",
                Mode::Redact
            ),
            "[redacted] and [redacted], plus [redacted]."
        );
    }

    #[test]
    fn test_redact_leaves_unlisted_fields() {
        let t = transformer("[TOKEN]");
        let text = "first name, zip code, gender identity";

        assert_eq!(run(&t, text, Mode::Redact), text);
    }

    #[test]
    fn test_redact_is_idempotent() {
        let t = transformer("[TOKEN]");
        let documents = [
            "SSN, passport, health information, Credit Card and insurance record",
            "Patient medical record attached",
            "nothing sensitive here",
            "driver's license; treatmentrecord; benefits  information",
            "",
        ];

        for document in documents {
            let once = t.transform(document.as_bytes(), Mode::Redact);
            let twice = t.transform(&once, Mode::Redact);
            assert_eq!(once, twice, "redact not idempotent for {:?}", document);
        }
    }

    #[test]
    fn test_redact_with_alternate_patterns() {
        let sources = PatternSources {
            pii: r"\bbadge \d+\b".to_string(),
            spii: r"\bsalary\b".to_string(),
        };
        let t = StandardTransformer::new(
            TransformerConfig::default(),
            Arc::new(PatternSet::compile(&sources).unwrap()),
        )
        .unwrap();

        assert_eq!(
            run(&t, "Badge 42 earns a salary; SSN unchanged", Mode::Redact),
            "[redacted] earns a [redacted]; SSN unchanged"
        );
    }

    #[test]
    fn test_token_accessor() {
        let t = transformer("<x>");

        assert_eq!(t.token(), "<x>");
    }
}
