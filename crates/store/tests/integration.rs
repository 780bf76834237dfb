//! Integration tests for the record store: cross-instance durability,
//! round-trip fidelity, and concurrent-writer safety.

use janus_common::{Label, TaskRecord, TaskStatus};
use janus_store::{RecordStore, StoreDocument};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn reload_sees_previous_writes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.xml");

    {
        let store = RecordStore::new(&path);
        store
            .upsert_task(
                TaskRecord::new("task_1", Label::Coding, "build a page")
                    .with_status(TaskStatus::Completed)
                    .with_log("Code tested successfully"),
            )
            .await
            .unwrap();
        store.append_result("Title: a\nDescription: b").await.unwrap();
        store.append_error("enhancement failed").await.unwrap();
    }

    // A fresh handle over the same file sees everything.
    let store = RecordStore::new(&path);
    let task = store.get_task("task_1").await.unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.log.as_deref(), Some("Code tested successfully"));
    assert_eq!(task.category, Label::Coding);
    assert_eq!(task.description, "build a page");

    let doc = store.snapshot().await.unwrap();
    assert_eq!(doc.results.entries.len(), 1);
    assert_eq!(doc.errors.entries.len(), 1);
}

#[tokio::test]
async fn roundtrip_through_serialization_is_semantically_identical() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path().join("records.xml"));

    store
        .upsert_task(TaskRecord::new("task_1", Label::Research, "widget X"))
        .await
        .unwrap();
    store
        .upsert_status("task_1", TaskStatus::Completed)
        .await
        .unwrap();
    store.append_log("task_1", "Success").await.unwrap();
    store.append_result("No results found.").await.unwrap();

    let doc = store.snapshot().await.unwrap();
    let reparsed = StoreDocument::from_xml(&doc.to_xml().unwrap()).unwrap();
    assert_eq!(reparsed, doc);
}

#[tokio::test]
async fn concurrent_writers_lose_no_updates() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(RecordStore::new(dir.path().join("records.xml")));

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let id = format!("task_{i}");
            store
                .upsert_task(
                    TaskRecord::new(&id, Label::Coding, format!("job {i}"))
                        .with_status(TaskStatus::Completed),
                )
                .await
                .unwrap();
            store.append_error(&format!("note {i}")).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let doc = store.snapshot().await.unwrap();
    assert_eq!(doc.tasks.items.len(), 8, "every record must survive");
    assert_eq!(doc.errors.entries.len(), 8);
    for i in 0..8 {
        let id = format!("task_{i}");
        assert!(
            store.get_task(&id).await.unwrap().is_some(),
            "task {id} must be independently retrievable"
        );
    }
}
