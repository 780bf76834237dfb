//! The persisted store document: one root container holding the task
//! records plus the two global entry collections.
//!
//! The on-disk shape is a small XML tree:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <RecordStore>
//!   <Tasks>
//!     <Task>
//!       <TaskID>task_..</TaskID>
//!       <Category>coding</Category>
//!       <Description>..</Description>
//!       <Status>completed</Status>
//!       <Log>Code tested successfully</Log>
//!     </Task>
//!   </Tasks>
//!   <Errors><Error timestamp="..">..</Error></Errors>
//!   <Results><Result timestamp="..">..</Result></Results>
//! </RecordStore>
//! ```

use chrono::Utc;
use janus_common::{JanusError, Result, TaskRecord};
use serde::{Deserialize, Serialize};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// A free-text entry with an RFC 3339 timestamp attribute. Used for both
/// the `Errors` and `Results` collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedEntry {
    #[serde(rename = "@timestamp")]
    pub timestamp: String,

    #[serde(rename = "$text", default)]
    pub message: String,
}

impl TimestampedEntry {
    /// Create an entry stamped with the current time.
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskCollection {
    #[serde(rename = "Task", default)]
    pub items: Vec<TaskRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorCollection {
    #[serde(rename = "Error", default)]
    pub entries: Vec<TimestampedEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultCollection {
    #[serde(rename = "Result", default)]
    pub entries: Vec<TimestampedEntry>,
}

/// Root of the persisted store.
///
/// Invariant: task ids are unique within `tasks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(rename = "Tasks", default)]
    pub tasks: TaskCollection,

    #[serde(rename = "Errors", default)]
    pub errors: ErrorCollection,

    #[serde(rename = "Results", default)]
    pub results: ResultCollection,
}

impl StoreDocument {
    pub fn find_task(&self, task_id: &str) -> Option<&TaskRecord> {
        self.tasks.items.iter().find(|t| t.task_id == task_id)
    }

    pub fn find_task_mut(&mut self, task_id: &str) -> Option<&mut TaskRecord> {
        self.tasks.items.iter_mut().find(|t| t.task_id == task_id)
    }

    /// Serialize to an XML string with a declaration header.
    pub fn to_xml(&self) -> Result<String> {
        let body = quick_xml::se::to_string_with_root("RecordStore", self)
            .map_err(|e| JanusError::Storage(format!("serialize store document: {e}")))?;
        Ok(format!("{XML_DECLARATION}\n{body}"))
    }

    /// Parse a document from XML text.
    pub fn from_xml(text: &str) -> Result<Self> {
        quick_xml::de::from_str(text)
            .map_err(|e| JanusError::Storage(format!("parse store document: {e}")))
    }
}
