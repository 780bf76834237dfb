//! The dispatcher: owns task-id issuance and the classify → execute →
//! record flow.

use janus_common::{
    fresh_task_id, JanusError, Label, Result, TaskHandler, TaskRecord, TaskStatus, TextClassifier,
};
use janus_store::RecordStore;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Orchestrates the task lifecycle: intake → classify → dispatch →
/// execute → record outcome.
///
/// Exactly one handler per label, held as explicit fields — with the
/// closed [`Label`] enum there is no representable "unknown category" at
/// runtime.
pub struct Dispatcher {
    classifier: Arc<dyn TextClassifier>,
    coding: Arc<dyn TaskHandler>,
    research: Arc<dyn TaskHandler>,
    store: Arc<RecordStore>,
}

impl Dispatcher {
    pub fn new(
        classifier: Arc<dyn TextClassifier>,
        coding: Arc<dyn TaskHandler>,
        research: Arc<dyn TaskHandler>,
        store: Arc<RecordStore>,
    ) -> Self {
        debug_assert_eq!(coding.label(), Label::Coding);
        debug_assert_eq!(research.label(), Label::Research);
        Self {
            classifier,
            coding,
            research,
            store,
        }
    }

    fn handler_for(&self, label: Label) -> &dyn TaskHandler {
        match label {
            Label::Coding => self.coding.as_ref(),
            Label::Research => self.research.as_ref(),
        }
    }

    /// Composed entry point: classify the description, then assign.
    ///
    /// A classification failure is logged to the global error collection
    /// and surfaced to the caller; no task record is created for it.
    pub async fn handle(&self, description: &str) -> Result<(String, Label)> {
        let label = match self.classifier.classify(description).await {
            Ok(label) => label,
            Err(e) => {
                warn!(error = %e, "Classification failed, no task created");
                if let Err(log_err) = self
                    .store
                    .append_error(&format!("task classification failed: {e}"))
                    .await
                {
                    error!(error = %log_err, "Could not record classification failure");
                }
                return Err(e);
            }
        };

        let task_id = self.assign(label, description).await?;
        Ok((task_id, label))
    }

    /// Issue a fresh task id, run the matching handler, and record the
    /// outcome.
    ///
    /// The recorded status is `completed` whenever the handler ran to a
    /// verdict — it tracks orchestration completion, while handler
    /// success/failure text travels in the task log. A handler *fault*
    /// (an `Err` from the invocation) writes no task record at all: the
    /// fault is appended to the global error log keyed by the issued id
    /// and surfaced as [`JanusError::Assignment`].
    pub async fn assign(&self, label: Label, description: &str) -> Result<String> {
        let task_id = fresh_task_id();
        info!(task_id = %task_id, label = %label, "Assigning task");

        // The handler runs with no store lock held; only the outcome
        // write below takes it.
        match self.handler_for(label).execute(description).await {
            Ok(verdict) => {
                let record = TaskRecord::new(&task_id, label, description)
                    .with_status(TaskStatus::Completed)
                    .with_log(verdict.note.clone());
                self.store.upsert_task(record).await?;

                if label == Label::Research {
                    self.store.append_result(&verdict.output).await?;
                }

                info!(task_id = %task_id, status = %TaskStatus::Completed, "Task recorded");
                Ok(task_id)
            }
            Err(e) => {
                let reason = e.to_string();
                error!(task_id = %task_id, error = %reason, "Handler invocation faulted");
                if let Err(log_err) = self
                    .store
                    .append_error(&format!("error assigning task {task_id}: {reason}"))
                    .await
                {
                    error!(error = %log_err, "Could not record assignment failure");
                }
                Err(JanusError::Assignment { task_id, reason })
            }
        }
    }

    /// Status lookup backed by the record store.
    pub async fn task_status(&self, task_id: &str) -> Result<Option<TaskStatus>> {
        Ok(self.store.get_task(task_id).await?.map(|task| task.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use janus_common::HandlerVerdict;
    use tempfile::TempDir;

    struct FixedClassifier(Label);

    #[async_trait]
    impl TextClassifier for FixedClassifier {
        async fn classify(&self, _text: &str) -> Result<Label> {
            Ok(self.0)
        }
    }

    struct NoteHandler {
        label: Label,
        note: &'static str,
    }

    #[async_trait]
    impl TaskHandler for NoteHandler {
        fn label(&self) -> Label {
            self.label
        }
        async fn execute(&self, _description: &str) -> Result<HandlerVerdict> {
            Ok(HandlerVerdict::new("output", self.note))
        }
    }

    fn dispatcher(dir: &TempDir, label: Label) -> Dispatcher {
        Dispatcher::new(
            Arc::new(FixedClassifier(label)),
            Arc::new(NoteHandler {
                label: Label::Coding,
                note: "Code tested successfully",
            }),
            Arc::new(NoteHandler {
                label: Label::Research,
                note: "Success",
            }),
            Arc::new(RecordStore::new(dir.path().join("records.xml"))),
        )
    }

    #[tokio::test]
    async fn handle_returns_id_and_label() {
        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(&dir, Label::Coding);

        let (task_id, label) = dispatcher.handle("build a page").await.unwrap();
        assert!(task_id.starts_with("task_"));
        assert_eq!(label, Label::Coding);

        let status = dispatcher.task_status(&task_id).await.unwrap();
        assert_eq!(status, Some(TaskStatus::Completed));
    }

    #[tokio::test]
    async fn unknown_task_status_is_none() {
        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(&dir, Label::Coding);
        assert_eq!(dispatcher.task_status("task_nope").await.unwrap(), None);
    }
}
