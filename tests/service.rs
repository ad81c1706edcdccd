//! Tests for the load/save/delete path and cache coherence.
mod common;
use common::*;
use rfcmap::prelude::*;
use serde_json::json;
use tokio_test::block_on;

fn service_with(defs: Vec<InterfaceDefinition>) -> InterfaceService<MemoryStore> {
    InterfaceService::new(MemoryStore::with_definitions(defs), MapperConfig::default())
}

#[test]
fn test_save_uppercases_id_and_function() {
    let service = service_with(vec![]);
    let mut def = create_order_definition();
    def.id = "order_create".to_string();
    def.rfc_function = " z_order_create ".to_string();

    let saved = block_on(service.save(&def, true)).unwrap();

    assert_eq!(saved.id, "ORDER_CREATE");
    assert_eq!(saved.rfc_function, "Z_ORDER_CREATE");
    let loaded = block_on(service.load("ORDER_CREATE")).unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn test_create_twice_is_duplicate() {
    let service = service_with(vec![]);
    let def = create_order_definition();

    block_on(service.save(&def, true)).unwrap();
    let err = block_on(service.save(&def, true)).unwrap_err();

    assert_eq!(
        err,
        ServiceError::Validation(ValidationError::DuplicateId("ORDER_CREATE".to_string()))
    );
}

#[test]
fn test_save_invalidates_detail_and_list_cache() {
    let service = service_with(vec![create_order_definition()]);

    let before = block_on(service.load("ORDER_CREATE")).unwrap();
    block_on(service.list()).unwrap();
    assert!(service.cache().contains("ORDER_CREATE"));
    assert!(service.cache().has_list());

    let mut edited = before.clone();
    edited.name = "Renamed".to_string();
    block_on(service.save(&edited, false)).unwrap();

    assert!(!service.cache().contains("ORDER_CREATE"));
    assert!(!service.cache().has_list());
    assert_eq!(block_on(service.load("ORDER_CREATE")).unwrap().name, "Renamed");
    assert_eq!(block_on(service.list()).unwrap()[0].name, "Renamed");
}

#[test]
fn test_delete_invalidates_cache() {
    let service = service_with(vec![create_order_definition()]);
    block_on(service.load("ORDER_CREATE")).unwrap();
    block_on(service.list()).unwrap();

    block_on(service.delete("order_create")).unwrap();

    assert!(!service.cache().contains("ORDER_CREATE"));
    assert!(!service.cache().has_list());
    let err = block_on(service.load("ORDER_CREATE")).unwrap_err();
    assert_eq!(
        err,
        ServiceError::Store(StoreError::NotFound("ORDER_CREATE".to_string()))
    );
    assert!(block_on(service.list()).unwrap().is_empty());
}

#[test]
fn test_failed_save_keeps_cache() {
    let service = service_with(vec![create_order_definition()]);
    block_on(service.load("ORDER_CREATE")).unwrap();

    let mut invalid = create_order_definition();
    invalid.rfc_function.clear();
    assert!(block_on(service.save(&invalid, false)).is_err());

    assert!(service.cache().contains("ORDER_CREATE"));
}

#[test]
fn test_loads_are_normalized() {
    let store = MemoryStore::new();
    store.insert_raw("mat_lookup", legacy_document());
    let service = InterfaceService::new(store, MapperConfig::default());

    let def = block_on(service.load("MAT_LOOKUP")).unwrap();
    assert_eq!(def.import_mapping[0].data_type, "CHAR");
    assert!(def.import_mapping[0].required);
}

#[test]
fn test_transport_errors_are_reported_verbatim() {
    let service = InterfaceService::new(FailingStore, MapperConfig::default());

    let err = block_on(service.load("X")).unwrap_err();
    assert_eq!(err.to_string(), "connection refused");

    // The lenient duplicate check lets the save through to the failing store.
    let err = block_on(service.save(&create_order_definition(), true)).unwrap_err();
    assert_eq!(
        err,
        ServiceError::Store(StoreError::Transport("connection refused".to_string()))
    );
}

#[test]
fn test_new_definition_is_seeded() {
    let service = service_with(vec![]);
    let def = service.new_definition("NEW_ONE");

    let value = def.to_value();
    assert_eq!(
        value["exportMapping"],
        json!([
            {
                "webField": "resultType",
                "sapParam": "EV_TYPE",
                "type": "CHAR",
                "size": 1,
                "example": "S",
                "remarks": "Execution status: S = success, E = error"
            },
            {
                "webField": "resultMessage",
                "sapParam": "EV_MESSAGE",
                "type": "CHAR",
                "size": 220,
                "example": "",
                "remarks": "Execution message"
            }
        ])
    );
}
