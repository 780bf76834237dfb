//! Coding handler: generates a minimal HTML page for the task and smoke
//! tests the result.
//!
//! The "test" mirrors what the service can actually verify without a
//! browser: the page is written to a scratch file and checked for
//! structural soundness. A failed test is a verdict, not a fault — the
//! failure detail travels back in the note.

use async_trait::async_trait;
use janus_common::{HandlerVerdict, Label, Result, TaskHandler};
use std::path::PathBuf;
use tracing::{debug, info};

const SUCCESS_NOTE: &str = "Code tested successfully";

/// Handler for the `coding` label.
pub struct CodingHandler {
    scratch_dir: PathBuf,
}

impl CodingHandler {
    pub fn new() -> Self {
        Self {
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Override where test pages are written.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    fn render_page(description: &str) -> String {
        let title = escape_html(description);
        format!(
            "<html>\n<head><title>{title}</title></head>\n<body>\n    \
             <h1>Generated Code for {title}</h1>\n</body>\n</html>\n"
        )
    }

    /// Write the page to a scratch file and run structural checks.
    /// Returns the verdict note.
    fn test_page(&self, code: &str) -> String {
        let path = self
            .scratch_dir
            .join(format!("janus_page_{}.html", uuid::Uuid::new_v4()));

        if let Err(e) = std::fs::write(&path, code) {
            return format!("Test failed: could not write {}: {e}", path.display());
        }
        debug!(path = %path.display(), "Wrote generated page");

        let note = if let Some(detail) = structural_problem(code) {
            format!("Test failed: {detail}")
        } else {
            SUCCESS_NOTE.to_string()
        };

        let _ = std::fs::remove_file(&path);
        note
    }
}

impl Default for CodingHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskHandler for CodingHandler {
    fn label(&self) -> Label {
        Label::Coding
    }

    async fn execute(&self, description: &str) -> Result<HandlerVerdict> {
        info!(
            description_preview = %description.chars().take(50).collect::<String>(),
            "Generating code for task"
        );

        let code = Self::render_page(description);
        let note = self.test_page(&code);

        Ok(HandlerVerdict::new(code, note))
    }
}

/// First structural problem with a generated page, if any.
fn structural_problem(code: &str) -> Option<&'static str> {
    if !code.contains("<html>") || !code.contains("</html>") {
        return Some("missing html element");
    }
    if !code.contains("<title>") {
        return Some("missing title element");
    }
    if !code.contains("<body>") || !code.contains("</body>") {
        return Some("missing body element");
    }
    None
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn generates_and_tests_a_page() {
        let dir = TempDir::new().unwrap();
        let handler = CodingHandler::new().with_scratch_dir(dir.path());

        let verdict = handler
            .execute("Create a new HTML page with interactive elements")
            .await
            .unwrap();

        assert_eq!(verdict.note, "Code tested successfully");
        assert!(verdict.output.contains("<html>"));
        assert!(verdict
            .output
            .contains("Create a new HTML page with interactive elements"));
    }

    #[tokio::test]
    async fn empty_description_still_yields_a_verdict() {
        let dir = TempDir::new().unwrap();
        let handler = CodingHandler::new().with_scratch_dir(dir.path());

        let verdict = handler.execute("").await.unwrap();
        assert_eq!(verdict.note, "Code tested successfully");
    }

    #[tokio::test]
    async fn unwritable_scratch_dir_is_a_failed_test_not_a_fault() {
        let handler = CodingHandler::new().with_scratch_dir("/definitely/not/a/dir");

        let verdict = handler.execute("task").await.unwrap();
        assert!(verdict.note.starts_with("Test failed:"), "{}", verdict.note);
    }

    #[test]
    fn structural_checks_catch_broken_pages() {
        assert_eq!(structural_problem("<p>nope</p>"), Some("missing html element"));
        assert_eq!(
            structural_problem("<html><body></body></html>"),
            Some("missing title element")
        );
        assert!(structural_problem(&CodingHandler::render_page("x")).is_none());
    }

    #[test]
    fn description_is_escaped_into_title() {
        let page = CodingHandler::render_page("a <script> & more");
        assert!(page.contains("a &lt;script&gt; &amp; more"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn handler_serves_coding_label() {
        assert_eq!(CodingHandler::new().label(), Label::Coding);
    }
}
