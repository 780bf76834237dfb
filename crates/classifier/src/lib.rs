//! Binary text classification for Janus.
//!
//! Maps free-text task descriptions onto the closed label set
//! {coding, research}:
//!
//! - [`EmbeddingClassifier`] — the real classifier; a pretrained local
//!   embedding model (downloaded once, cached on disk) scored against
//!   fixed label prototypes.
//! - [`KeywordClassifier`] — deterministic keyword fallback for tests and
//!   model-less environments.
//!
//! Both are total: any input yields exactly one label or a
//! classification error — long input is truncated, never rejected.

pub mod embedding;
pub mod keyword;

pub use embedding::{ClassifierConfig, EmbeddingClassifier};
pub use keyword::KeywordClassifier;

/// Cap `text` at `max_tokens` whitespace-separated tokens.
///
/// Classification must never fail merely because input is long.
pub fn truncate_tokens(text: &str, max_tokens: usize) -> String {
    let mut tokens = text.split_whitespace();
    let truncated: Vec<&str> = tokens.by_ref().take(max_tokens).collect();
    if tokens.next().is_none() {
        // Under the cap: keep the original text (and its spacing) as-is.
        text.to_string()
    } else {
        truncated.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_untouched() {
        assert_eq!(truncate_tokens("fix  the bug", 512), "fix  the bug");
    }

    #[test]
    fn long_input_is_capped() {
        let input = "word ".repeat(600);
        let out = truncate_tokens(&input, 512);
        assert_eq!(out.split_whitespace().count(), 512);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(truncate_tokens("", 512), "");
    }

    #[test]
    fn exact_boundary_is_untouched() {
        let input = "a b c";
        assert_eq!(truncate_tokens(input, 3), "a b c");
    }
}
