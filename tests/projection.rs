//! Tests for building invocation payloads from definitions.
mod common;
use common::*;
use rfcmap::prelude::*;
use serde_json::json;

fn data_of(raw: serde_json::Value) -> serde_json::Value {
    serde_json::Value::Object(project(&normalize(&raw), None).data)
}

#[test]
fn test_required_import_without_sample_projects_empty_string() {
    let data = data_of(json!({
        "importMapping": [{ "webField": "qty", "required": true }],
        "tableMapping": []
    }));
    assert_eq!(data, json!({ "qty": "" }));
}

#[test]
fn test_optional_import_with_example_projects_example() {
    let data = data_of(json!({
        "importMapping": [{ "webField": "qty", "required": false, "example": "10" }]
    }));
    assert_eq!(data, json!({ "qty": "10" }));
}

#[test]
fn test_optional_import_without_sample_is_absent() {
    let mut def = normalize(&json!({
        "importMapping": [{ "webField": "qty", "required": false, "defaultValue": "", "example": "" }]
    }));
    assert!(project(&def, None).data.get("qty").is_none());

    def.set_scalar(ScalarKind::Import, 0, &FieldEdit::Example("X".into()));
    assert_eq!(project(&def, None).data["qty"], "X");
}

#[test]
fn test_default_value_wins_over_example() {
    let data = data_of(json!({
        "importMapping": [{ "webField": "plant", "defaultValue": "1000", "example": "2000" }]
    }));
    assert_eq!(data, json!({ "plant": "1000" }));
}

#[test]
fn test_empty_web_field_is_skipped() {
    let data = data_of(json!({
        "importMapping": [{ "webField": "", "sapField": "WERKS", "required": true }],
        "tableMapping": [{ "webFields": "", "sapTable": "IT_X", "required": true }]
    }));
    assert_eq!(data, json!({}));
}

#[test]
fn test_optional_table_without_samples_projects_empty_list() {
    let data = data_of(json!({
        "tableMapping": [{
            "webFields": "items",
            "required": false,
            "fields": [{ "webField": "sku", "example": "" }]
        }]
    }));
    assert_eq!(data, json!({ "items": [] }));
}

#[test]
fn test_table_with_sample_projects_one_row() {
    let data = data_of(json!({
        "tableMapping": [{
            "webFields": "items",
            "required": false,
            "fields": [{ "webField": "sku", "example": "A1" }]
        }]
    }));
    assert_eq!(data, json!({ "items": [{ "sku": "A1" }] }));
}

#[test]
fn test_row_contains_only_included_columns() {
    let data = data_of(json!({
        "tableMapping": [{
            "webFields": "items",
            "fields": [
                { "webField": "sku", "example": "A1" },
                { "webField": "qty" },
                { "webField": "unit", "required": "Y" }
            ]
        }]
    }));
    assert_eq!(data, json!({ "items": [{ "sku": "A1", "unit": "" }] }));
}

#[test]
fn test_required_empty_table_projects_single_empty_row() {
    let data = data_of(json!({
        "tableMapping": [{ "webFields": "items", "required": true, "fields": [] }]
    }));
    assert_eq!(data, json!({ "items": [{}] }));
}

#[test]
fn test_response_side_is_not_projected() {
    let payload = project(&create_order_definition(), Some("alice"));

    assert_eq!(payload.interface_id, "ORDER_CREATE");
    assert_eq!(payload.user_id, "alice");
    assert_eq!(
        serde_json::Value::Object(payload.data),
        json!({
            "plant": "1000",
            "items": [{ "sku": "", "qty": "1" }]
        })
    );
}

#[test]
fn test_default_user_id_placeholder() {
    let payload = project(&create_order_definition(), None);
    assert_eq!(payload.user_id, "test");
}

#[test]
fn test_later_duplicate_key_wins() {
    let data = data_of(json!({
        "importMapping": [
            { "webField": "k", "example": "first" },
            { "webField": "k", "example": "second" }
        ]
    }));
    assert_eq!(data, json!({ "k": "second" }));
}

#[test]
fn test_envelope_serializes_camel_case() {
    let payload = project(&create_order_definition(), None);
    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(value["interfaceId"], "ORDER_CREATE");
    assert_eq!(value["userId"], "test");
    assert!(value["data"].is_object());
}

#[test]
fn test_projection_is_byte_identical_across_calls() {
    let raw = legacy_document();
    let first = project(&normalize(&raw), None).to_pretty_json();
    let second = project(&normalize(&raw), None).to_pretty_json();
    assert_eq!(first, second);
}
