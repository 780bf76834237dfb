//! Keyword-based classifier.
//!
//! Deterministic fallback implementation of [`TextClassifier`] for tests
//! and deployments where the embedding model is unavailable. Anything that
//! reads like a build/change request routes to `coding`; everything else
//! routes to `research`.

use async_trait::async_trait;
use janus_common::{Label, Result, TextClassifier};

const CODING_KEYWORDS: &[&str] = &[
    "code",
    "fix",
    "bug",
    "implement",
    "refactor",
    "debug",
    "build",
    "html",
    "page",
    "script",
    "write a function",
    "create a",
];

/// Keyword matcher over lowercased input.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn label_for(text: &str) -> Label {
        let lower = text.to_lowercase();
        if CODING_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            Label::Coding
        } else {
            Label::Research
        }
    }
}

#[async_trait]
impl TextClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<Label> {
        Ok(Self::label_for(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn coding_keywords_route_to_coding() {
        let classifier = KeywordClassifier::new();
        assert_eq!(
            classifier
                .classify("Create a new HTML page with interactive elements")
                .await
                .unwrap(),
            Label::Coding
        );
        assert_eq!(
            classifier.classify("fix the parser bug").await.unwrap(),
            Label::Coding
        );
    }

    #[tokio::test]
    async fn everything_else_routes_to_research() {
        let classifier = KeywordClassifier::new();
        assert_eq!(
            classifier
                .classify("best practices for widget X")
                .await
                .unwrap(),
            Label::Research
        );
        assert_eq!(
            classifier
                .classify("what is the capital of France")
                .await
                .unwrap(),
            Label::Research
        );
    }

    #[tokio::test]
    async fn empty_input_is_handled() {
        let classifier = KeywordClassifier::new();
        assert_eq!(classifier.classify("").await.unwrap(), Label::Research);
    }
}
