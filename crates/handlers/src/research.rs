//! Research handler: query generation, enhancement, fetch, and summary.
//!
//! Two base queries are derived from the task description; the model
//! gateway is asked for three more specific ones. Gateway failure is an
//! expected condition — the handler falls back to the base queries and
//! the research still runs. Per-query fetch failures are logged and
//! skipped; only the final summary decides the verdict.

use crate::search::{SearchHit, SearchProvider};
use async_trait::async_trait;
use janus_common::{HandlerVerdict, Label, Result, TaskHandler};
use janus_llm::{ModelGateway, ProviderId};
use std::sync::Arc;
use tracing::{info, warn};

const SUCCESS_NOTE: &str = "Success";
const EMPTY_SUMMARY: &str = "No results found.";
const SUMMARY_LIMIT: usize = 5;

/// Which provider backs query enhancement.
const ENHANCEMENT_PROVIDER: ProviderId = ProviderId::OpenAi;

/// Handler for the `research` label.
pub struct ResearchHandler {
    gateway: Arc<ModelGateway>,
    search: Arc<dyn SearchProvider>,
}

impl ResearchHandler {
    pub fn new(gateway: Arc<ModelGateway>, search: Arc<dyn SearchProvider>) -> Self {
        Self { gateway, search }
    }

    fn base_queries(description: &str) -> Vec<String> {
        vec![
            format!("{description} best practices"),
            format!("{description} tutorials"),
        ]
    }

    /// Ask the gateway for more specific queries; fall back to the base
    /// queries alone when the call fails.
    async fn build_queries(&self, description: &str) -> Vec<String> {
        let base = Self::base_queries(description);
        let prompt = format!(
            "Given the task: '{description}' and base queries: {base:?}, \
             generate 3 more specific and targeted search queries, one per line."
        );

        match self.gateway.complete(ENHANCEMENT_PROVIDER, &prompt).await {
            Ok(text) => {
                let enhanced: Vec<String> = text
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect();
                base.into_iter().chain(enhanced).collect()
            }
            Err(e) => {
                warn!(error = %e, "Query enhancement failed, using base queries");
                base
            }
        }
    }

    async fn fetch_all(&self, queries: &[String]) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        for query in queries {
            match self.search.search(query).await {
                Ok(mut found) => hits.append(&mut found),
                Err(e) => {
                    // A dead query is skipped, never fatal to the task.
                    warn!(query = %query, error = %e, "Search query failed");
                }
            }
        }
        hits
    }

    fn summarize(hits: &[SearchHit]) -> String {
        if hits.is_empty() {
            return EMPTY_SUMMARY.to_string();
        }
        hits.iter()
            .take(SUMMARY_LIMIT)
            .map(|hit| format!("Title: {}\nDescription: {}\n", hit.title, hit.snippet))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl TaskHandler for ResearchHandler {
    fn label(&self) -> Label {
        Label::Research
    }

    async fn execute(&self, description: &str) -> Result<HandlerVerdict> {
        let queries = self.build_queries(description).await;
        info!(queries = queries.len(), "Running research queries");

        let hits = self.fetch_all(&queries).await;
        let summary = Self::summarize(&hits);

        Ok(HandlerVerdict::new(summary, SUCCESS_NOTE))
    }
}
