//! Tests for nested structures, shared visibility, materialized copies and
//! document initialization.

use serde_json::json;

use docnest::{Doc, ProxyKind, TypeRegistry};

use crate::helpers::*;

#[test]
fn test_nested_writes_create_addressable_containers() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set(
        "config",
        json!({"db": {"host": "localhost", "ports": [5432, 5433]}}),
    )
    .unwrap();

    let db = root.get_map("config").unwrap().get_map("db").unwrap();
    assert_eq!(db.get("host").unwrap(), "localhost");

    let ports = db.get_list("ports").unwrap();
    assert_eq!(ports.get(0).unwrap(), 5432);

    // A mutation through the nested proxy is visible from the top.
    ports.append(5434).unwrap();
    assert_eq!(
        root.to_json().unwrap(),
        json!({"config": {"db": {"host": "localhost", "ports": [5432, 5433, 5434]}}})
    );
}

#[test]
fn test_two_handles_share_live_state() {
    let store = test_store();
    let name = unique_name("shared");
    let first = Doc::new(store.clone(), name.clone());
    let second = Doc::new(store, name);

    first.root().unwrap().set("counter", 1).unwrap();
    assert_eq!(second.root().unwrap().get("counter").unwrap(), 1);

    second.root().unwrap().set("counter", 2).unwrap();
    assert_eq!(first.root().unwrap().get("counter").unwrap(), 2);
}

#[test]
fn test_materialized_copies_detach() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("profile", json!({"age": 36})).unwrap();

    let profile = root.get_map("profile").unwrap();
    let mut snapshot = profile.to_json().unwrap();

    // Remote changes do not reach the copy.
    profile.set("age", 99).unwrap();
    assert_eq!(snapshot, json!({"age": 36}));

    // Local changes to the copy do not reach the document.
    snapshot["age"] = json!(1);
    assert_eq!(profile.get("age").unwrap(), 99);
}

#[test]
fn test_dangling_proxies_report_missing_keys() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("child", json!({"x": 1})).unwrap();
    root.set("items", json!([1, 2])).unwrap();

    let child = root.get_map("child").unwrap();
    let items = root.get_list("items").unwrap();
    root.clear().unwrap();

    assert_key_not_found(child.get("x"));
    assert_key_not_found(child.len());
    assert_key_not_found(child.keys());
    assert_key_not_found(child.delete("x"));
    assert_key_not_found(items.get(0));
    assert_key_not_found(items.len());

    // The document itself is fine, so this is not a store failure.
    let err = child.get("x").unwrap_err();
    assert!(!err.is_store_error());
}

#[test]
fn test_content_equality_between_documents() {
    let payload = json!({"name": "ada", "tags": [1, 2]});

    let first = test_doc();
    first.root_with(payload.clone()).unwrap();
    let second = test_doc();
    second.root_with(payload).unwrap();

    let a = first.root().unwrap();
    let b = second.root().unwrap();
    assert!(a.content_eq(&b.to_json().unwrap()).unwrap());

    b.set("name", "grace").unwrap();
    assert!(!a.content_eq(&b.to_json().unwrap()).unwrap());
}

#[test]
fn test_root_initializers_enforce_shape() {
    let doc = test_doc();
    assert_type_mismatch(doc.root_with(json!([1, 2])));
    assert_type_mismatch(doc.root_list_with(json!({"a": 1})));

    doc.root_list().unwrap();
    // The existing root is a sequence, so a mapping view is refused.
    assert_type_mismatch(doc.root());

    let other = test_doc();
    other.root().unwrap();
    assert_type_mismatch(other.root_list());
}

#[test]
fn test_root_with_replaces_existing_content() {
    let doc = test_doc();
    doc.root_with(json!({"old": true})).unwrap();
    doc.root_with(json!({"new": 1})).unwrap();

    let root = doc.root().unwrap();
    assert_eq!(root.keys().unwrap(), vec!["new"]);
}

#[test]
fn test_initializers_are_idempotent() {
    let store = test_store();
    assert!(store.document_names().is_empty());

    let doc = test_doc_on(store.clone());
    // Construction alone touches nothing.
    assert!(store.document_names().is_empty());

    doc.root().unwrap().set("k", 1).unwrap();
    assert_eq!(store.document_names(), vec![doc.name().to_string()]);

    // Re-opening the root does not reset it.
    assert_eq!(doc.root().unwrap().get("k").unwrap(), 1);
}

#[test]
fn test_views_at_nested_paths() {
    let doc = test_doc();

    let settings = doc.map_at("$.config.settings".parse().unwrap()).unwrap();
    settings.set("theme", "dark").unwrap();

    let root = doc.root().unwrap();
    assert_eq!(
        root.to_json().unwrap(),
        json!({"config": {"settings": {"theme": "dark"}}})
    );

    let history = doc.list_at("$.config.history".parse().unwrap()).unwrap();
    history.append("boot").unwrap();
    assert_eq!(history.get(0).unwrap(), "boot");

    // An existing value of the other kind is refused.
    assert_type_mismatch(doc.list_at("$.config.settings".parse().unwrap()));
    assert_type_mismatch(doc.map_at("$.config.history".parse().unwrap()));
}

#[test]
fn test_registry_controls_dispatch() {
    let store = test_store();
    let name = unique_name("registry");

    {
        let doc = Doc::new(store.clone(), name.clone());
        let root = doc.root().unwrap();
        root.set("items", json!([1, 2])).unwrap();
    }

    // Rerouting the array tag to Scalar makes container payloads undecodable.
    let mut registry = TypeRegistry::new();
    registry.register("object", ProxyKind::Mapping);
    registry.register("array", ProxyKind::Scalar);
    let doc = Doc::with_registry(store, name, registry);

    assert_type_mismatch(doc.root().unwrap().get("items"));
}
