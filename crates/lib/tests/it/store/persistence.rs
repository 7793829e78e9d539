//! Tests for snapshot persistence of the in-memory store.

use std::sync::Arc;

use serde_json::json;

use docnest::{Doc, InMemoryStore};

use crate::helpers::*;

#[test]
fn test_snapshot_round_trip_through_documents() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let snapshot = dir.path().join("store.json");

    let store = test_store();
    let name = unique_name("persist");
    let doc = Doc::new(store.clone(), name.clone());
    let root = doc.root().unwrap();
    root.set("title", "expedition").unwrap();
    root.set("waypoints", json!([{"lat": 51.5}, {"lat": 48.9}]))
        .unwrap();

    store.save_to_file(&snapshot).unwrap();

    let loaded = Arc::new(InMemoryStore::load_from_file(&snapshot).unwrap());
    let reopened = Doc::new(loaded, name);
    let root = reopened.root().unwrap();
    assert_eq!(root.get("title").unwrap(), "expedition");
    assert_eq!(
        root.get_list("waypoints").unwrap().get_map(1).unwrap().get("lat").unwrap(),
        48.9
    );
}

#[test]
fn test_loading_a_missing_snapshot_starts_empty() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let absent = dir.path().join("never-written.json");

    let store = Arc::new(InMemoryStore::load_from_file(&absent).unwrap());
    assert_eq!(store.document_count(), 0);

    // A fresh store is fully usable.
    let doc = test_doc_on(store);
    doc.root().unwrap().set("k", 1).unwrap();
    assert_eq!(doc.root().unwrap().get("k").unwrap(), 1);
}

#[test]
fn test_snapshot_preserves_every_document() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let snapshot = dir.path().join("store.json");

    let store = test_store();
    let first = test_doc_on(store.clone());
    let second = test_doc_on(store.clone());
    first.root().unwrap().set("id", 1).unwrap();
    second.root_list().unwrap().append(2).unwrap();

    store.save_to_file(&snapshot).unwrap();
    let loaded = InMemoryStore::load_from_file(&snapshot).unwrap();

    let mut expected = vec![first.name().to_string(), second.name().to_string()];
    expected.sort();
    assert_eq!(loaded.document_names(), expected);
}

#[test]
fn test_loaded_store_is_detached_from_the_original() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let snapshot = dir.path().join("store.json");

    let store = test_store();
    let name = unique_name("detach");
    Doc::new(store.clone(), name.clone())
        .root()
        .unwrap()
        .set("k", "before")
        .unwrap();
    store.save_to_file(&snapshot).unwrap();

    let loaded = Arc::new(InMemoryStore::load_from_file(&snapshot).unwrap());
    Doc::new(loaded.clone(), name.clone())
        .root()
        .unwrap()
        .set("k", "after")
        .unwrap();

    let original = Doc::new(store, name);
    assert_eq!(original.root().unwrap().get("k").unwrap(), "before");
}
