//! Common test utilities for building interface definitions and stores.
use async_trait::async_trait;
use rfcmap::prelude::*;
use serde_json::{Value, json};

/// A stored document in the legacy shape: string booleans, snake_case keys, missing
/// types and sizes given as strings.
#[allow(dead_code)]
pub fn legacy_document() -> Value {
    json!({
        "id": "mat_lookup",
        "name": "Material lookup",
        "sap_module": "MM",
        "rfc_function": "z_mat_lookup",
        "executable": "Y",
        "importMapping": [
            { "webField": "plant", "sapField": "WERKS", "required": "Y", "size": "4" },
            { "webField": "material", "sap_field": "MATNR", "required": "N", "example": "M-01" },
            { "webField": "lang", "sapField": "SPRAS", "type": "", "defaultValue": "EN" }
        ],
        "tableMapping": [
            {
                "webFields": "items",
                "sapTable": "IT_ITEMS",
                "required": "true",
                "fields": [
                    { "webField": "sku", "sapField": "MATNR", "example": "A1" },
                    { "webField": "qty", "sapField": "MENGE", "type": "DECIMAL", "size": 13 }
                ]
            },
            { "webFields": "notes", "sapTable": "IT_NOTES" }
        ],
        "exportMapping": [
            { "webField": "resultType", "sapParam": "EV_TYPE", "required": true, "defaultValue": "X" }
        ],
        "returnTableMapping": [
            {
                "webReturnList": "stock",
                "sapReturnTable": "ET_STOCK",
                "required": "Y",
                "fields": [{ "webField": "onHand", "sapField": "LABST" }]
            }
        ]
    })
}

/// A canonical, executable definition with one import row and one required table.
///
/// Request: `plant` (required, default `1000`) and `items[]` of `{sku, qty}`.
/// Response: `resultType`, `resultMessage` and `stock[]` of `{onHand}`.
#[allow(dead_code)]
pub fn create_order_definition() -> InterfaceDefinition {
    let mut def = InterfaceDefinition::seeded("ORDER_CREATE", &ReservedExports::default());
    def.name = "Create order".to_string();
    def.rfc_function = "Z_ORDER_CREATE".to_string();
    def.executable = true;
    def.import_mapping.push(
        ImportField::new()
            .with_web("plant")
            .with_sap("WERKS")
            .with_size(4)
            .with_default("1000"),
    );
    def.table_mapping.push(
        InputTable::new()
            .with_web("items")
            .with_sap("IT_ITEMS")
            .with_required(true)
            .with_field(TableField::new().with_web("sku").with_sap("MATNR").with_required(true))
            .with_field(TableField::new().with_web("qty").with_sap("MENGE").with_default("1")),
    );
    def.return_table_mapping.push(
        ReturnTable::new()
            .with_web("stock")
            .with_sap("ET_STOCK")
            .with_field(TableField::new().with_web("onHand").with_sap("LABST")),
    );
    def
}

/// A definition with three import rows `a`, `b`, `c` in that order.
#[allow(dead_code)]
pub fn create_three_row_definition() -> InterfaceDefinition {
    let mut def = InterfaceDefinition::new("ABC");
    def.rfc_function = "Z_ABC".to_string();
    for name in ["a", "b", "c"] {
        def.import_mapping
            .push(ImportField::new().with_web(name).with_sap(name.to_uppercase()));
    }
    def
}

/// A store whose every call fails with a transport error.
#[allow(dead_code)]
pub struct FailingStore;

#[async_trait]
impl InterfaceStore for FailingStore {
    async fn fetch_one(&self, _id: &str) -> Result<InterfaceDefinition, StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn fetch_all(&self) -> Result<Vec<InterfaceDefinition>, StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn save(&self, _def: &InterfaceDefinition, _mode: SaveMode) -> Result<(), StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }
}
