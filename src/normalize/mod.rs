//! Conversion of arbitrary, possibly legacy-shaped JSON into a canonical
//! [`InterfaceDefinition`].
//!
//! Normalization is total: malformed input never fails, it degrades to defaults.
//! Missing collections become empty, a blank `type` becomes `CHAR`, and the legacy
//! boolean encodings `true`, `"true"` and `"Y"` become `true` (everything else `false`).
//! It is also idempotent, so a definition can be normalized again at every load or save
//! boundary without drifting.

mod coerce;

pub use coerce::is_truthy;

use crate::model::{Field, FieldRole, InterfaceDefinition, TableBlock, TableRole};
use coerce::{elements, lookup, size, text};
use serde_json::{Map, Value};

/// Anything that can be turned into a canonical interface definition.
///
/// This is the extension point for feeding definitions from other sources into the
/// mapping core: implement it for your own document type and hand the result to the
/// editor, projector or service.
///
/// # Example
///
/// ```rust
/// use rfcmap::normalize::Normalize;
///
/// let raw = serde_json::json!({
///     "id": "STOCK_MOVEMENT",
///     "importMapping": [{ "webField": "plant", "sapField": "WERKS", "required": "Y" }]
/// });
/// let def = raw.normalize();
/// assert_eq!(def.import_mapping[0].data_type, "CHAR");
/// assert!(def.import_mapping[0].required);
/// ```
pub trait Normalize {
    fn normalize(&self) -> InterfaceDefinition;
}

impl Normalize for Value {
    fn normalize(&self) -> InterfaceDefinition {
        normalize(self)
    }
}

impl Normalize for InterfaceDefinition {
    fn normalize(&self) -> InterfaceDefinition {
        self.normalized()
    }
}

impl Normalize for str {
    /// Text that is not valid JSON normalizes to an empty definition.
    fn normalize(&self) -> InterfaceDefinition {
        let raw = serde_json::from_str::<Value>(self).unwrap_or(Value::Null);
        normalize(&raw)
    }
}

/// Builds a canonical definition from any JSON value.
///
/// A document of the form `{"interface": {...}}` is unwrapped first.
pub fn normalize(raw: &Value) -> InterfaceDefinition {
    let empty = Map::new();
    let obj = unwrap_envelope(raw).as_object().unwrap_or(&empty);

    InterfaceDefinition {
        id: text(lookup(obj, &["id"])),
        name: text(lookup(obj, &["name"])),
        description: text(lookup(obj, &["description"])),
        sap_module: text(lookup(obj, &["sapModule", "sap_module"])),
        rfc_function: text(lookup(obj, &["rfcFunction", "rfc_function"])),
        executable: lookup(obj, &["executable"]).is_some_and(is_truthy),
        import_mapping: elements(lookup(obj, &["importMapping", "import_mapping"]))
            .iter()
            .map(field_from_value)
            .collect(),
        table_mapping: elements(lookup(obj, &["tableMapping", "table_mapping"]))
            .iter()
            .map(table_from_value)
            .collect(),
        export_mapping: elements(lookup(obj, &["exportMapping", "export_mapping"]))
            .iter()
            .map(field_from_value)
            .collect(),
        return_table_mapping: elements(lookup(
            obj,
            &["returnTableMapping", "return_table_mapping"],
        ))
        .iter()
        .map(table_from_value)
        .collect(),
    }
}

fn unwrap_envelope(raw: &Value) -> &Value {
    match raw.as_object() {
        Some(obj) if !obj.contains_key("id") => match obj.get("interface") {
            Some(inner @ Value::Object(_)) => inner,
            _ => raw,
        },
        _ => raw,
    }
}

/// Normalizes one scalar row or table column for role `R`.
pub fn field_from_value<R: FieldRole>(raw: &Value) -> Field<R> {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let required = match lookup(obj, &["required"]) {
        Some(v) => is_truthy(v),
        None => R::REQUIRED_BY_DEFAULT,
    };

    let mut field = Field::<R>::new()
        .with_web(text(lookup(obj, &["webField", "web_field"])))
        .with_sap(text(lookup(obj, R::SAP_ALIASES)))
        .with_type(text(lookup(obj, &["type", "dataType", "data_type"])))
        .with_size(size(lookup(obj, &["size"])))
        .with_required(required)
        .with_default(text(lookup(obj, &["defaultValue", "default_value"])))
        .with_example(text(lookup(obj, &["example"])))
        .with_remarks(text(lookup(obj, &["remarks"])));
    field.canonicalize();
    field
}

/// Normalizes one table block for role `R`. Absent `fields` become an empty list.
pub fn table_from_value<R: TableRole>(raw: &Value) -> TableBlock<R> {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let mut block = TableBlock::<R>::new()
        .with_web(text(lookup(obj, R::LIST_ALIASES)))
        .with_sap(text(lookup(obj, R::TABLE_ALIASES)))
        .with_required(lookup(obj, &["required"]).is_some_and(is_truthy))
        .with_single_value(lookup(obj, &["singleValue", "single_value"]).is_some_and(is_truthy));
    block.fields = elements(lookup(obj, &["fields"]))
        .iter()
        .map(field_from_value)
        .collect();
    block.canonicalize();
    block
}
