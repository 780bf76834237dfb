//! Task types: the classification label, lifecycle status, and the
//! persisted task record.

use serde::{Deserialize, Serialize};

/// Which handling path a task was routed to.
///
/// Closed two-valued set; the classifier maps raw model output index 0 to
/// `Coding` and index 1 to `Research`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[default]
    Coding,
    Research,
}

impl Label {
    /// Map a raw classifier output index to a label.
    ///
    /// Returns `None` for out-of-range indices; callers must treat that as
    /// a classification failure, never accept it silently.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Label::Coding),
            1 => Some(Label::Research),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Coding => "coding",
            Label::Research => "research",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current lifecycle status of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted state of one dispatched task.
///
/// Field renames match the record store's document contract (`TaskID`,
/// `Status`, ...). `log` is a single latest-wins outcome note; repeated
/// log writes replace it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "TaskID")]
    pub task_id: String,

    #[serde(rename = "Category", default = "default_category")]
    pub category: Label,

    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Status")]
    pub status: TaskStatus,

    /// Latest outcome note (success text or failure detail), if any.
    #[serde(rename = "Log", skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

fn default_category() -> Label {
    Label::Coding
}

impl TaskRecord {
    pub fn new(task_id: impl Into<String>, category: Label, description: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            category,
            description: description.into(),
            status: TaskStatus::Pending,
            log: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_log(mut self, log: impl Into<String>) -> Self {
        self.log = Some(log.into());
        self
    }
}

/// Generate a fresh task identifier. Never reused within a store.
pub fn fresh_task_id() -> String {
    format!("task_{}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_from_index_is_fixed_mapping() {
        assert_eq!(Label::from_index(0), Some(Label::Coding));
        assert_eq!(Label::from_index(1), Some(Label::Research));
        assert_eq!(Label::from_index(2), None);
        assert_eq!(Label::from_index(usize::MAX), None);
    }

    #[test]
    fn label_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Label::Coding).unwrap(), "\"coding\"");
        assert_eq!(
            serde_json::to_string(&Label::Research).unwrap(),
            "\"research\""
        );
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn status_roundtrips_all_variants() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Failed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: TaskStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn fresh_task_ids_are_unique() {
        let a = fresh_task_id();
        let b = fresh_task_id();
        assert!(a.starts_with("task_"));
        assert_ne!(a, b);
    }

    #[test]
    fn record_builder() {
        let record = TaskRecord::new("task_1", Label::Research, "look things up")
            .with_status(TaskStatus::Completed)
            .with_log("Success");

        assert_eq!(record.status, TaskStatus::Completed);
        assert_eq!(record.log.as_deref(), Some("Success"));
        assert_eq!(record.category, Label::Research);
    }
}
