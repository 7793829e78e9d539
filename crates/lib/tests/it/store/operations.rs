//! Tests for the store trait contract through a trait object.

use std::sync::Arc;

use serde_json::json;

use docnest::{Doc, DocumentStore, InMemoryStore, Path};

use crate::helpers::*;

fn path(input: &str) -> Path {
    input.parse().expect("Failed to parse path")
}

#[test]
fn test_primitives_through_a_trait_object() {
    let store: Arc<dyn DocumentStore> = test_store();
    let name = unique_name("trait");

    store
        .set(&name, &path("$"), &json!({"a": {"b": 1}}))
        .unwrap();

    assert_eq!(store.kind_of(&name, &path("$")).unwrap().as_deref(), Some("object"));
    assert_eq!(
        store.kind_of(&name, &path("$.a.b")).unwrap().as_deref(),
        Some("integer")
    );
    assert_eq!(store.get(&name, &path("$.a.b")).unwrap(), Some(json!(1)));
    assert!(store.exists(&name, &path("$.a")).unwrap());
    assert!(!store.exists(&name, &path("$.z")).unwrap());

    assert!(store.delete(&name, &path("$.a.b")).unwrap());
    assert!(!store.delete(&name, &path("$.a.b")).unwrap());
    assert_eq!(store.object_len(&name, &path("$.a")).unwrap(), Some(0));
}

#[test]
fn test_array_primitives_through_a_trait_object() {
    let store: Arc<dyn DocumentStore> = test_store();
    let name = unique_name("trait-array");

    store.set(&name, &path("$"), &json!([1, 2])).unwrap();
    assert_eq!(store.array_len(&name, &path("$")).unwrap(), Some(2));

    assert_eq!(store.array_append(&name, &path("$"), &json!(4)).unwrap(), 3);
    assert_eq!(store.array_insert(&name, &path("$"), 2, &json!(3)).unwrap(), 4);
    assert_eq!(store.get(&name, &path("$")).unwrap(), Some(json!([1, 2, 3, 4])));

    // Mapping queries on a sequence report a kind error rather than absence.
    assert!(store.object_keys(&name, &path("$")).is_err());
}

#[test]
fn test_as_any_downcast() {
    let store: Arc<dyn DocumentStore> = test_store();
    let concrete = store
        .as_any()
        .downcast_ref::<InMemoryStore>()
        .expect("Failed to downcast to InMemoryStore");
    assert_eq!(concrete.document_count(), 0);
}

#[test]
fn test_documents_are_isolated() {
    let store = test_store();
    let first = test_doc_on(store.clone());
    let second = test_doc_on(store.clone());

    first.root().unwrap().set("k", 1).unwrap();
    second.root().unwrap().set("k", 2).unwrap();
    assert_eq!(first.root().unwrap().get("k").unwrap(), 1);
    assert_eq!(store.document_count(), 2);

    // Deleting one document's root leaves the other alone.
    assert!(store.delete(first.name(), &path("$")).unwrap());
    assert_eq!(store.document_count(), 1);
    assert_eq!(second.root().unwrap().get("k").unwrap(), 2);
}

#[test]
fn test_shared_store_backs_multiple_views() {
    let store = test_store();
    let name = unique_name("views");
    let doc = Doc::new(store.clone(), name.clone());
    doc.root().unwrap().set("items", json!([1])).unwrap();

    // Raw writes through the trait are visible to the proxies.
    store
        .array_append(&name, &path("$.items"), &json!(2))
        .unwrap();
    let items = doc.root().unwrap().get_list("items").unwrap();
    assert_eq!(items.to_json().unwrap(), json!([1, 2]));
}
