//! Tests for normalization of stored documents into canonical definitions.
mod common;
use common::*;
use proptest::prelude::*;
use rfcmap::prelude::*;
use serde_json::{Value, json};

#[test]
fn test_normalize_fills_missing_collections() {
    let def = normalize(&json!({ "id": "EMPTY" }));

    assert_eq!(def.id, "EMPTY");
    assert!(def.import_mapping.is_empty());
    assert!(def.table_mapping.is_empty());
    assert!(def.export_mapping.is_empty());
    assert!(def.return_table_mapping.is_empty());
    assert!(!def.executable);
}

#[test]
fn test_normalize_is_total_over_non_objects() {
    for raw in [json!(null), json!(42), json!("text"), json!([1, 2, 3])] {
        assert_eq!(normalize(&raw), InterfaceDefinition::default());
    }
    assert_eq!("not json at all".normalize(), InterfaceDefinition::default());
}

#[test]
fn test_missing_type_defaults_to_char() {
    let def = normalize(&legacy_document());

    assert_eq!(def.import_mapping[0].data_type, "CHAR");
    assert_eq!(def.import_mapping[2].data_type, "CHAR", "blank type");
    assert_eq!(def.table_mapping[0].fields[0].data_type, "CHAR");
    assert_eq!(def.table_mapping[0].fields[1].data_type, "DECIMAL");
}

#[test]
fn test_legacy_booleans_are_coerced() {
    for truthy in [json!(true), json!("true"), json!("Y")] {
        let def = normalize(&json!({ "importMapping": [{ "required": truthy }] }));
        assert!(def.import_mapping[0].required, "{truthy} should be true");
    }
    for falsy in [json!(false), json!("false"), json!("N"), json!("y"), json!(1), json!({})] {
        let def = normalize(&json!({ "importMapping": [{ "required": falsy }] }));
        assert!(!def.import_mapping[0].required, "{falsy} should be false");
    }
}

#[test]
fn test_absent_required_takes_role_default() {
    let def = normalize(&json!({
        "importMapping": [{ "webField": "a" }],
        "tableMapping": [{ "webFields": "t", "fields": [{ "webField": "c" }] }]
    }));

    assert!(def.import_mapping[0].required);
    assert!(!def.table_mapping[0].fields[0].required);
    assert!(!def.table_mapping[0].required);
}

#[test]
fn test_legacy_document_shape() {
    let def = normalize(&legacy_document());

    assert_eq!(def.sap_module, "MM");
    assert_eq!(def.rfc_function, "z_mat_lookup", "case is left to the save path");
    assert!(def.executable);
    assert_eq!(def.import_mapping[0].size, 4);
    assert_eq!(def.import_mapping[1].sap_name, "MATNR");
    assert!(!def.import_mapping[1].required);
    assert!(def.table_mapping[0].required);
    assert!(def.table_mapping[1].fields.is_empty());
    assert_eq!(def.incomplete_tables(), vec![(TableKind::Input, 1)]);
}

#[test]
fn test_direction_specific_attributes_are_dropped() {
    let def = normalize(&legacy_document());

    let export = &def.export_mapping[0];
    assert_eq!(export.sap_name, "EV_TYPE");
    assert!(!export.required);
    assert!(export.default_value.is_empty());

    let ret = &def.return_table_mapping[0];
    assert_eq!(ret.web_list, "stock");
    assert_eq!(ret.sap_table, "ET_STOCK");
    assert!(!ret.required);
}

#[test]
fn test_serialized_form_uses_direction_keys() {
    let value = create_order_definition().to_value();

    assert_eq!(value["importMapping"][0]["sapField"], "WERKS");
    assert_eq!(value["exportMapping"][0]["sapParam"], "EV_TYPE");
    assert!(value["exportMapping"][0].get("required").is_none());
    assert_eq!(value["tableMapping"][0]["webFields"], "items");
    assert_eq!(value["tableMapping"][0]["singleValue"], false);
    assert_eq!(value["returnTableMapping"][0]["webReturnList"], "stock");
    assert_eq!(value["returnTableMapping"][0]["sapReturnTable"], "ET_STOCK");
    assert!(value["returnTableMapping"][0].get("required").is_none());
}

#[test]
fn test_envelope_is_unwrapped() {
    let wrapped = json!({ "interface": { "id": "X", "rfcFunction": "Z_X" } });
    let def = normalize(&wrapped);
    assert_eq!(def.id, "X");
    assert_eq!(def.rfc_function, "Z_X");
}

#[test]
fn test_deserialize_goes_through_normalizer() {
    let def: InterfaceDefinition = serde_json::from_value(legacy_document()).unwrap();
    assert_eq!(def, normalize(&legacy_document()));
}

#[test]
fn test_normalize_is_idempotent_on_legacy_document() {
    let once = normalize(&legacy_document());
    let twice = normalize(&once.to_value());
    assert_eq!(once, twice);
    assert_eq!(once.normalized(), once);
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        prop_oneof![
            Just("Y".to_string()),
            Just("true".to_string()),
            Just("".to_string()),
            "[a-zA-Z0-9 ]{0,8}",
        ]
        .prop_map(Value::String),
    ];
    let keys = prop_oneof![
        Just("id".to_string()),
        Just("webField".to_string()),
        Just("sapField".to_string()),
        Just("sapParam".to_string()),
        Just("webFields".to_string()),
        Just("sapTable".to_string()),
        Just("type".to_string()),
        Just("size".to_string()),
        Just("required".to_string()),
        Just("defaultValue".to_string()),
        Just("example".to_string()),
        Just("fields".to_string()),
        Just("importMapping".to_string()),
        Just("tableMapping".to_string()),
        Just("exportMapping".to_string()),
        Just("returnTableMapping".to_string()),
    ];
    leaf.prop_recursive(4, 48, 6, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(keys.clone(), inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(raw in arb_json()) {
        let once = normalize(&raw);
        let twice = normalize(&once.to_value());
        prop_assert_eq!(&once, &twice);
        for field in &once.import_mapping {
            prop_assert!(!field.data_type.is_empty());
        }
    }

    #[test]
    fn prop_projection_is_deterministic(raw in arb_json()) {
        let def = normalize(&raw);
        let first = project(&def, None).to_pretty_json();
        let second = project(&normalize(&raw), None).to_pretty_json();
        prop_assert_eq!(first, second);
    }
}
