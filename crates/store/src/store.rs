//! The record store: a single XML file, read and rewritten wholesale on
//! every mutation.
//!
//! All mutations serialize through one async mutex (single-writer
//! discipline), and every write goes to a temp file that is fsynced and
//! atomically renamed over the target, so a crashed or failed write leaves
//! the previous document intact and readers never observe a partial file.

use crate::document::{StoreDocument, TimestampedEntry};
use janus_common::{JanusError, Result, TaskRecord, TaskStatus};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Durable mapping from task id to task record, plus the global error and
/// result logs.
///
/// Every operation is self-healing: if the backing file is absent it is
/// initialized with an empty well-formed document before the operation
/// proceeds. Callers never create schema explicitly.
pub struct RecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set a task's status, creating the record with exactly that status
    /// when the id is unknown. Idempotent.
    pub async fn upsert_status(&self, task_id: &str, status: TaskStatus) -> Result<()> {
        self.mutate(|doc| {
            match doc.find_task_mut(task_id) {
                Some(task) => task.status = status,
                None => {
                    debug!(task_id = %task_id, status = %status, "Creating task on status update");
                    doc.tasks.items.push(
                        TaskRecord::new(task_id, Default::default(), "").with_status(status),
                    );
                }
            }
            Ok(())
        })
        .await?;

        info!(task_id = %task_id, status = %status, "Task status updated");
        Ok(())
    }

    /// Record an outcome note on an existing task. Latest-wins: a second
    /// write replaces the first. Unknown ids return
    /// [`JanusError::TaskNotFound`] and leave the task collection
    /// untouched.
    pub async fn append_log(&self, task_id: &str, text: &str) -> Result<()> {
        self.mutate(|doc| match doc.find_task_mut(task_id) {
            Some(task) => {
                task.log = Some(text.to_string());
                Ok(())
            }
            None => Err(JanusError::TaskNotFound(task_id.to_string())),
        })
        .await
    }

    /// Append a timestamped entry to the global error log.
    pub async fn append_error(&self, message: &str) -> Result<()> {
        self.mutate(|doc| {
            doc.errors.entries.push(TimestampedEntry::now(message));
            Ok(())
        })
        .await
    }

    /// Append a timestamped entry to the global result log.
    pub async fn append_result(&self, summary: &str) -> Result<()> {
        self.mutate(|doc| {
            doc.results.entries.push(TimestampedEntry::now(summary));
            Ok(())
        })
        .await
    }

    /// Persist a full record in one mutation, replacing any record with
    /// the same id.
    pub async fn upsert_task(&self, record: TaskRecord) -> Result<()> {
        self.mutate(|doc| {
            match doc.find_task_mut(&record.task_id) {
                Some(existing) => *existing = record,
                None => doc.tasks.items.push(record),
            }
            Ok(())
        })
        .await
    }

    /// Look up a task record by id.
    pub async fn get_task(&self, task_id: &str) -> Result<Option<TaskRecord>> {
        let _guard = self.write_lock.lock().await;
        self.ensure_initialized()?;
        Ok(self.load()?.find_task(task_id).cloned())
    }

    /// A consistent copy of the whole document.
    pub async fn snapshot(&self) -> Result<StoreDocument> {
        let _guard = self.write_lock.lock().await;
        self.ensure_initialized()?;
        self.load()
    }

    /// Serialized read-modify-write of the whole document. The closure's
    /// error aborts the mutation without writing anything back.
    async fn mutate<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut StoreDocument) -> Result<()>,
    {
        let _guard = self.write_lock.lock().await;
        self.ensure_initialized()?;
        let mut doc = self.load()?;
        f(&mut doc)?;
        self.save(&doc)
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        info!(path = %self.path.display(), "Initializing record store");
        self.save(&StoreDocument::default())
    }

    fn load(&self) -> Result<StoreDocument> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            JanusError::Storage(format!("read {}: {e}", self.path.display()))
        })?;
        StoreDocument::from_xml(&text)
    }

    /// Write the document via temp file + fsync + atomic rename.
    fn save(&self, doc: &StoreDocument) -> Result<()> {
        let xml = doc.to_xml()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    JanusError::Storage(format!("create {}: {e}", parent.display()))
                })?;
            }
        }

        let tmp_path = self.temp_path();
        let mut tmp = File::create(&tmp_path)
            .map_err(|e| JanusError::Storage(format!("create {}: {e}", tmp_path.display())))?;
        tmp.write_all(xml.as_bytes())
            .and_then(|()| tmp.sync_all())
            .map_err(|e| JanusError::Storage(format!("write {}: {e}", tmp_path.display())))?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            JanusError::Storage(format!(
                "rename {} -> {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store.xml".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}
