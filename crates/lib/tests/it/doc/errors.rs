//! Tests for the error taxonomy.
//!
//! Each failure keeps its identity: an absent key, a bad index, a wrong
//! shape, a bad slice assignment and an unreachable store must stay
//! distinguishable at the crate error level.

use std::sync::Arc;

use serde_json::json;

use docnest::{Doc, Error, Path, Slice};

use crate::helpers::*;

#[test]
fn test_missing_key_classification() {
    let doc = test_doc();
    let root = doc.root().unwrap();

    let err = root.get("ghost").unwrap_err();
    assert!(err.is_key_not_found());
    assert!(err.is_not_found());
    assert!(!err.is_index_out_of_range());
    assert!(!err.is_type_mismatch());
    assert!(!err.is_store_error());
    assert_eq!(err.module(), "doc");
    assert_eq!(err.to_string(), "key not found: 'ghost'");
}

#[test]
fn test_index_out_of_range_classification() {
    let doc = test_doc();
    let list = doc.root_list_with(json!([1, 2, 3])).unwrap();

    let err = list.get(7).unwrap_err();
    assert!(err.is_index_out_of_range());
    assert!(err.is_not_found());
    assert!(!err.is_key_not_found());
    assert!(!err.is_store_error());
    assert_eq!(err.to_string(), "index 7 out of range for length 3");
}

#[test]
fn test_type_mismatch_classification() {
    let doc = test_doc();
    let root = doc.root().unwrap();
    root.set("name", "ada").unwrap();

    let err = root.get_map("name").unwrap_err();
    assert!(err.is_type_mismatch());
    assert!(!err.is_not_found());
    assert!(!err.is_store_error());
}

#[test]
fn test_length_mismatch_classification() {
    let doc = test_doc();
    let list = doc.root_list_with(json!([1, 2, 3, 4])).unwrap();

    let err = list
        .set_slice(Slice::full().with_step(2), [9])
        .unwrap_err();
    assert!(err.is_length_mismatch());
    assert!(!err.is_index_out_of_range());
    assert!(!err.is_store_error());
    assert_eq!(
        err.to_string(),
        "cannot assign 1 values to a selection of 2 positions"
    );
}

#[test]
fn test_store_failure_is_never_a_content_condition() {
    let store = Arc::new(UnreachableStore);
    let doc = Doc::new(store, unique_name("down"));

    let err = doc.root().unwrap_err();
    assert!(err.is_store_error());
    assert!(err.is_store_unavailable());
    assert!(!err.is_not_found());
    assert!(!err.is_key_not_found());
    assert!(!err.is_type_mismatch());
    assert_eq!(err.module(), "store");
    assert!(err.to_string().contains("connection refused"));

    let err = doc.cursor().key("anything").get().unwrap_err();
    assert!(err.is_store_error());
    assert!(!err.is_key_not_found());

    let err = doc.cursor().key("anything").set(1).unwrap_err();
    assert!(err.is_store_error());
}

#[test]
fn test_path_error_classification() {
    let err: Error = "no-dollar".parse::<Path>().unwrap_err().into();
    assert!(err.is_path_error());
    assert!(!err.is_store_error());
    assert_eq!(err.module(), "doc");
}

#[test]
fn test_zero_step_classification() {
    let doc = test_doc();
    let list = doc.root_list_with(json!([1])).unwrap();

    let err = list.slice(Slice::new(None, None, Some(0))).unwrap_err();
    assert!(err.is_zero_step());
    assert!(!err.is_length_mismatch());
}
