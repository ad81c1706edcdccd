//! Builds the request body for one invocation of an interface from its definition and the
//! sample values authored on it.
//!
//! Only the request side is projected: `importMapping` and `tableMapping`. The export and
//! return-table collections describe the response and never contribute to the body.

use crate::config::DEFAULT_USER_ID;
use crate::model::{Field, FieldRole, InputTable, InterfaceDefinition};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// The invocation envelope handed to whoever submits the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationPayload {
    pub interface_id: String,
    pub user_id: String,
    pub data: Map<String, Value>,
}

impl InvocationPayload {
    /// Pretty-printed JSON, ready to be pasted into a test console.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Projects `def` into an invocation payload.
///
/// `user_id` falls back to [`DEFAULT_USER_ID`]. The result depends only on `def` and
/// `user_id`: keys in `data` are ordered, and when two entries share a web key the later
/// one wins.
///
/// Inclusion rules:
/// * an import field appears iff it is required or has a default or example; its value is
///   the default, else the example, else `""`. Fields with an empty web key are skipped;
/// * a table block with an empty list key is skipped;
/// * an optional table block whose columns carry no samples becomes `[]`;
/// * any other table block becomes a one-row list, the row built with the import rule.
pub fn project(def: &InterfaceDefinition, user_id: Option<&str>) -> InvocationPayload {
    let mut data = project_fields(&def.import_mapping);

    for block in &def.table_mapping {
        if block.web_list.is_empty() {
            continue;
        }
        data.insert(block.web_list.clone(), project_table(block));
    }

    debug!(
        interface_id = %def.id,
        keys = data.len(),
        "Projected invocation payload"
    );

    InvocationPayload {
        interface_id: def.id.clone(),
        user_id: user_id.unwrap_or(DEFAULT_USER_ID).to_string(),
        data,
    }
}

fn project_fields<R: FieldRole>(fields: &[Field<R>]) -> Map<String, Value> {
    fields
        .iter()
        .filter(|f| f.is_projected())
        .map(|f| (f.web_field.clone(), Value::String(f.sample_value().to_string())))
        .collect()
}

fn project_table(block: &InputTable) -> Value {
    if !block.required && !block.has_sample() {
        return Value::Array(Vec::new());
    }
    Value::Array(vec![Value::Object(project_fields(&block.fields))])
}
