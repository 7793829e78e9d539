//! Tests for the Map proxy: lookup, assignment, removal, iteration and
//! materialization.

use serde_json::json;

use docnest::Value;

use crate::helpers::*;

#[test]
fn test_set_get_delete_lifecycle() {
    let doc = test_doc();
    let root = doc.root().expect("Failed to initialize root");

    assert!(!root.contains_key("greeting").unwrap());
    assert_key_not_found(root.get("greeting"));

    root.set("greeting", "hello").unwrap();
    assert!(root.contains_key("greeting").unwrap());
    assert_eq!(root.get("greeting").unwrap(), "hello");

    // Assignment overwrites in place.
    root.set("greeting", "goodbye").unwrap();
    assert_eq!(root.get("greeting").unwrap(), "goodbye");

    root.delete("greeting").unwrap();
    assert!(!root.contains_key("greeting").unwrap());
    assert_key_not_found(root.get("greeting"));

    // Deleting an absent key is an error, not a no-op.
    assert_key_not_found(root.delete("greeting"));
}

#[test]
fn test_contains_is_idempotent() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("flag", true).unwrap();

    // The same query keeps its answer as long as nothing mutates.
    for _ in 0..3 {
        assert!(root.contains_key("flag").unwrap());
        assert!(!root.contains_key("ghost").unwrap());
    }
    assert_eq!(root.len().unwrap(), 1);
}

#[test]
fn test_scalar_round_trips() {
    let doc = test_doc();
    let root = doc.root().unwrap();

    root.set("count", 42).unwrap();
    root.set("ratio", 2.5).unwrap();
    root.set("active", true).unwrap();
    root.set("label", "primary").unwrap();
    root.set("missing", json!(null)).unwrap();

    assert_eq!(root.get("count").unwrap(), 42);
    assert_eq!(root.get("ratio").unwrap(), 2.5);
    assert_eq!(root.get("active").unwrap(), true);
    assert_eq!(root.get("label").unwrap(), "primary");
    assert!(root.get("missing").unwrap().is_null());

    // Integers and floats keep their identity through the store.
    assert!(root.get("count").unwrap().is_int());
    assert!(root.get("ratio").unwrap().is_float());

    let count: i64 = root.get_as("count").unwrap();
    assert_eq!(count, 42);
    let label: String = root.get_as("label").unwrap();
    assert_eq!(label, "primary");
}

#[test]
fn test_keys_and_len() {
    let doc = test_doc();
    let root = doc.root().unwrap();

    assert_eq!(root.len().unwrap(), 0);
    assert!(root.is_empty().unwrap());
    assert!(root.keys().unwrap().is_empty());

    root.set("beta", 2).unwrap();
    root.set("alpha", 1).unwrap();
    root.set("gamma", 3).unwrap();

    assert_eq!(root.len().unwrap(), 3);
    assert!(!root.is_empty().unwrap());
    assert_eq!(root.keys().unwrap(), vec!["alpha", "beta", "gamma"]);
}

#[test]
fn test_iteration_yields_key_value_pairs() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("x", 1).unwrap();
    root.set("y", 2).unwrap();

    let mut seen = Vec::new();
    for entry in root.iter().unwrap() {
        let (key, value) = entry.unwrap();
        seen.push((key, value));
    }

    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, "x");
    assert_eq!(seen[0].1, 1);
    assert_eq!(seen[1].0, "y");
    assert_eq!(seen[1].1, 2);
}

#[test]
fn test_pop_removes_and_returns() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("score", 5).unwrap();
    root.set("nested", json!({"a": 1})).unwrap();

    assert_eq!(root.pop("score").unwrap(), Some(json!(5)));
    assert!(!root.contains_key("score").unwrap());
    assert_eq!(root.pop("score").unwrap(), None);

    // Containers come back fully materialized.
    assert_eq!(root.pop("nested").unwrap(), Some(json!({"a": 1})));
    assert!(root.is_empty().unwrap());
}

#[test]
fn test_pop_last_follows_key_order() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("a", 1).unwrap();
    root.set("z", 26).unwrap();

    assert_eq!(root.pop_last().unwrap(), Some(("z".into(), json!(26))));
    assert_eq!(root.pop_last().unwrap(), Some(("a".into(), json!(1))));
    assert_eq!(root.pop_last().unwrap(), None);
}

#[test]
fn test_clear_empties_the_mapping() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("a", 1).unwrap();
    root.set("b", json!({"nested": true})).unwrap();
    root.set("c", json!([1, 2, 3])).unwrap();

    root.clear().unwrap();

    assert_eq!(root.len().unwrap(), 0);
    assert!(root.keys().unwrap().is_empty());
    assert_eq!(root.to_json().unwrap(), json!({}));
}

#[test]
fn test_to_json_materializes_recursively() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("name", "ada").unwrap();
    root.set("tags", json!(["math", "engines"])).unwrap();
    root.set("profile", json!({"age": 36})).unwrap();

    assert_eq!(
        root.to_json().unwrap(),
        json!({
            "name": "ada",
            "tags": ["math", "engines"],
            "profile": {"age": 36},
        })
    );
}

#[test]
fn test_content_eq_compares_structure() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("a", 1).unwrap();
    root.set("b", json!([true, null])).unwrap();

    assert!(root.content_eq(&json!({"a": 1, "b": [true, null]})).unwrap());
    assert!(!root.content_eq(&json!({"a": 1, "b": [true, false]})).unwrap());
    assert!(!root.content_eq(&json!({"a": 1})).unwrap());
    assert!(!root.content_eq(&json!([1, 2])).unwrap());
}

#[test]
fn test_typed_accessors_check_kinds() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("profile", json!({"age": 36})).unwrap();
    root.set("tags", json!([1, 2])).unwrap();
    root.set("name", "ada").unwrap();

    assert_eq!(root.get_map("profile").unwrap().get("age").unwrap(), 36);
    assert_eq!(root.get_list("tags").unwrap().len().unwrap(), 2);

    assert_type_mismatch(root.get_map("name"));
    assert_type_mismatch(root.get_list("profile"));
    assert_type_mismatch(root.get_as::<i64>("name"));
}

#[test]
fn test_value_variants_surface_containers_as_proxies() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("nested", json!({"k": "v"})).unwrap();

    match root.get("nested").unwrap() {
        Value::Map(map) => assert_eq!(map.get("k").unwrap(), "v"),
        other => panic!("Expected a map value, got: {other:?}"),
    }

    assert_entry(&root, "nested", json!({"k": "v"}));
}
