//! Search provider seam for the research handler.
//!
//! The handler only depends on the [`SearchProvider`] trait;
//! [`HttpSearchProvider`] is the live implementation. The extraction here
//! is deliberately shallow — result pages change shape often, and a query
//! that yields nothing is a skipped query, not a failure of the task.

use async_trait::async_trait;
use janus_common::{JanusError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SEARCH_URL: &str = "https://www.google.com/search";
const USER_AGENT: &str = "Mozilla/5.0";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One fetched search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
}

/// Fetches results for a single query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

/// Live HTTP implementation over a web search results page.
pub struct HttpSearchProvider {
    http_client: reqwest::Client,
}

impl HttpSearchProvider {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| JanusError::Handler(format!("build search http client: {e}")))?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = format!("{SEARCH_URL}?q={}", urlencoding::encode(query));

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| JanusError::Handler(format!("fetch '{query}': {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JanusError::Handler(format!("fetch '{query}': HTTP {status}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| JanusError::Handler(format!("read '{query}': {e}")))?;

        let hits = extract_hits(&html);
        debug!(query = %query, hits = hits.len(), "Fetched search results");
        Ok(hits)
    }
}

/// Pull `<h3>` headings out of a results page as titles.
fn extract_hits(html: &str) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    let mut rest = html;

    while let Some(open) = rest.find("<h3") {
        let after_open = &rest[open..];
        let Some(tag_end) = after_open.find('>') else {
            break;
        };
        let inner_start = &after_open[tag_end + 1..];
        let Some(close) = inner_start.find("</h3>") else {
            break;
        };

        let title = strip_tags(&inner_start[..close]);
        if !title.is_empty() {
            hits.push(SearchHit {
                title,
                snippet: "No Description".to_string(),
            });
        }
        rest = &inner_start[close + "</h3>".len()..];
    }

    hits
}

/// Drop any nested markup, keeping the text content.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_h3_titles() {
        let html = r#"<div><h3 class="x">First result</h3><p>..</p><h3><span>Second</span> result</h3></div>"#;
        let hits = extract_hits(html);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "First result");
        assert_eq!(hits[1].title, "Second result");
        assert_eq!(hits[0].snippet, "No Description");
    }

    #[test]
    fn empty_page_yields_no_hits() {
        assert!(extract_hits("<html><body>nothing here</body></html>").is_empty());
    }

    #[test]
    fn unterminated_heading_is_ignored() {
        assert!(extract_hits("<h3>dangling").is_empty());
    }

    #[test]
    fn strip_tags_keeps_text() {
        assert_eq!(strip_tags("<b>bold</b> and plain"), "bold and plain");
        assert_eq!(strip_tags("  spaced  "), "spaced");
    }
}
