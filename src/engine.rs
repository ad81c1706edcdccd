//! Maps live request and response data through a definition.
//!
//! The engine translates shapes only: web request data becomes remote import parameters
//! and tables, remote export parameters and tables become web response data. Performing
//! the remote call is somebody else's job.

use crate::error::MappingError;
use crate::model::{ExportField, ImportField, InputTable, InterfaceDefinition, ReturnTable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// A flat JSON object keyed by web or remote names.
pub type Params = Map<String, Value>;
/// One table row.
pub type Row = Map<String, Value>;
/// Remote tables keyed by table name.
pub type Tables = BTreeMap<String, Vec<Row>>;

/// Everything the remote procedure needs as input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRequest {
    pub rfc_function: String,
    pub imports: Params,
    pub tables: Tables,
}

/// Everything the remote procedure handed back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteResponse {
    pub exports: Params,
    pub tables: Tables,
}

/// Stateless mapper bound to one definition.
#[derive(Debug, Clone, Copy)]
pub struct MappingEngine<'a> {
    def: &'a InterfaceDefinition,
}

impl<'a> MappingEngine<'a> {
    pub fn new(def: &'a InterfaceDefinition) -> Self {
        Self { def }
    }

    /// Maps a web request body into the remote input.
    pub fn map_request(&self, web: &Params) -> Result<RemoteRequest, MappingError> {
        let imports = self.map_import(web, &self.def.import_mapping)?;
        let tables = self.map_tables(web, &self.def.table_mapping)?;
        debug!(
            interface_id = %self.def.id,
            imports = imports.len(),
            tables = tables.len(),
            "Mapped request"
        );
        Ok(RemoteRequest {
            rfc_function: self.def.rfc_function.clone(),
            imports,
            tables,
        })
    }

    /// Maps the remote output into one web response object.
    ///
    /// Return tables are written after export parameters and win on a shared key.
    pub fn map_response(&self, remote: &RemoteResponse) -> Params {
        let mut out = self.map_export(&remote.exports, &self.def.export_mapping);
        out.extend(self.map_return_tables(&remote.tables, &self.def.return_table_mapping));
        out
    }

    /// Import parameters keyed by remote name.
    ///
    /// A missing or `null` web value falls back to the row's default; a required row with
    /// neither fails.
    pub fn map_import(&self, web: &Params, fields: &[ImportField]) -> Result<Params, MappingError> {
        let mut params = Params::new();
        for field in fields {
            match present(web.get(&field.web_field), &field.default_value) {
                Some(value) => {
                    trace!(web = %field.web_field, sap = %field.sap_name, "Mapped import");
                    params.insert(field.sap_name.clone(), value);
                }
                None if field.required => {
                    return Err(self.missing_field(field.web_field.clone()));
                }
                None => {}
            }
        }
        Ok(params)
    }

    /// Input tables keyed by remote table name.
    ///
    /// Single-value blocks accept an object, or a bare value that is applied to every
    /// column, and produce exactly one row. Other blocks require an array of row objects.
    pub fn map_tables(&self, web: &Params, blocks: &[InputTable]) -> Result<Tables, MappingError> {
        let mut tables = Tables::new();
        for block in blocks {
            let Some(web_value) = web.get(&block.web_list).filter(|v| !v.is_null()) else {
                if block.required {
                    return Err(MappingError::RequiredTableMissing {
                        interface_id: self.def.id.clone(),
                        web_list: block.web_list.clone(),
                        sap_table: block.sap_table.clone(),
                    });
                }
                continue;
            };

            if block.fields.is_empty() {
                return Err(MappingError::NoFieldsConfigured {
                    interface_id: self.def.id.clone(),
                    web_list: block.web_list.clone(),
                    sap_table: block.sap_table.clone(),
                });
            }

            let rows = if block.single_value {
                vec![self.map_single_row(block, web_value)?]
            } else {
                let Value::Array(items) = web_value else {
                    return Err(MappingError::NotAnArray {
                        interface_id: self.def.id.clone(),
                        web_list: block.web_list.clone(),
                    });
                };
                items
                    .iter()
                    .map(|item| self.map_row(block, item))
                    .collect::<Result<Vec<_>, _>>()?
            };
            trace!(web = %block.web_list, sap = %block.sap_table, rows = rows.len(), "Mapped table");
            tables.insert(block.sap_table.clone(), rows);
        }
        Ok(tables)
    }

    /// Export parameters keyed by web name. Parameters the remote side did not return are
    /// left out.
    pub fn map_export(&self, remote: &Params, fields: &[ExportField]) -> Params {
        fields
            .iter()
            .filter_map(|field| {
                remote
                    .get(&field.sap_name)
                    .filter(|v| !v.is_null())
                    .map(|v| (field.web_field.clone(), v.clone()))
            })
            .collect()
    }

    /// Return tables keyed by web list name, each row renamed column by column.
    pub fn map_return_tables(&self, remote: &Tables, blocks: &[ReturnTable]) -> Params {
        let mut out = Params::new();
        for block in blocks {
            let Some(rows) = remote.get(&block.sap_table) else {
                debug!(sap_table = %block.sap_table, "Return table absent from remote output");
                continue;
            };
            let web_rows: Vec<Value> = rows
                .iter()
                .map(|row| {
                    let mapped: Row = block
                        .fields
                        .iter()
                        .filter_map(|f| {
                            row.get(&f.sap_name)
                                .filter(|v| !v.is_null())
                                .map(|v| (f.web_field.clone(), v.clone()))
                        })
                        .collect();
                    Value::Object(mapped)
                })
                .collect();
            debug!(
                sap_table = %block.sap_table,
                web_list = %block.web_list,
                rows = web_rows.len(),
                "Mapped return table"
            );
            out.insert(block.web_list.clone(), Value::Array(web_rows));
        }
        out
    }

    fn map_single_row(&self, block: &InputTable, web_value: &Value) -> Result<Row, MappingError> {
        let mut row = Row::new();
        for field in &block.fields {
            let raw = match web_value {
                Value::Object(obj) => obj.get(&field.web_field),
                other => Some(other),
            };
            match present(raw, &field.default_value) {
                Some(value) => {
                    row.insert(field.sap_name.clone(), value);
                }
                None if field.required => {
                    return Err(
                        self.missing_field(format!("{}.{}", block.web_list, field.web_field))
                    );
                }
                None => {}
            }
        }
        Ok(row)
    }

    fn map_row(&self, block: &InputTable, item: &Value) -> Result<Row, MappingError> {
        let mut row = Row::new();
        for field in &block.fields {
            let raw = item.as_object().and_then(|obj| obj.get(&field.web_field));
            match present(raw, &field.default_value) {
                Some(value) => {
                    row.insert(field.sap_name.clone(), value);
                }
                None if field.required => {
                    return Err(
                        self.missing_field(format!("{}[].{}", block.web_list, field.web_field))
                    );
                }
                None => {}
            }
        }
        Ok(row)
    }

    fn missing_field(&self, path: String) -> MappingError {
        MappingError::RequiredFieldMissing {
            interface_id: self.def.id.clone(),
            path,
        }
    }
}

/// The supplied value unless it is absent or `null`, else the default. An empty default counts
/// as none, since normalization merges it with an absent one.
fn present(value: Option<&Value>, default_value: &str) -> Option<Value> {
    match value {
        Some(v) if !v.is_null() => Some(v.clone()),
        _ if !default_value.is_empty() => Some(Value::String(default_value.to_string())),
        _ => None,
    }
}
