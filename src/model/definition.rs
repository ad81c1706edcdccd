use super::field::Field;
use super::role::{Export, Import, Input, Output};
use super::table::TableBlock;
use super::TableKind;
use crate::catalog::SapType;
use serde::{Deserialize, Deserializer, Serialize};

pub type ImportField = Field<Import>;
pub type ExportField = Field<Export>;
pub type TableField = Field<super::role::Column>;
pub type InputTable = TableBlock<Input>;
pub type ReturnTable = TableBlock<Output>;

/// Remote parameter name of the seeded execution-status export row.
pub const STATUS_PARAM: &str = "EV_TYPE";
/// Remote parameter name of the seeded execution-message export row.
pub const MESSAGE_PARAM: &str = "EV_MESSAGE";

/// The two export parameters every new definition starts with.
///
/// Removing one of them from a definition requires explicit confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedExports {
    pub status_param: String,
    pub message_param: String,
}

impl Default for ReservedExports {
    fn default() -> Self {
        Self {
            status_param: STATUS_PARAM.to_string(),
            message_param: MESSAGE_PARAM.to_string(),
        }
    }
}

impl ReservedExports {
    pub fn contains(&self, sap_param: &str) -> bool {
        sap_param == self.status_param || sap_param == self.message_param
    }

    /// The export rows a brand-new definition is seeded with.
    pub fn seed_rows(&self) -> Vec<ExportField> {
        vec![
            ExportField::new()
                .with_web("resultType")
                .with_sap(self.status_param.as_str())
                .with_type(SapType::Char.as_str())
                .with_size(1)
                .with_example("S")
                .with_remarks("Execution status: S = success, E = error"),
            ExportField::new()
                .with_web("resultMessage")
                .with_sap(self.message_param.as_str())
                .with_type(SapType::Char.as_str())
                .with_size(220)
                .with_remarks("Execution message"),
        ]
    }
}

/// The root aggregate: one web contract mapped onto one remote procedure.
///
/// Collections are ordered and their elements have no identity beyond their position.
/// Deserializing goes through [`crate::normalize`], so any JSON document yields a
/// canonical definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub sap_module: String,
    pub rfc_function: String,
    /// Gate for generating an invocation payload.
    pub executable: bool,
    pub import_mapping: Vec<ImportField>,
    pub table_mapping: Vec<InputTable>,
    pub export_mapping: Vec<ExportField>,
    pub return_table_mapping: Vec<ReturnTable>,
}

impl InterfaceDefinition {
    /// An empty definition with the given id and no mappings.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// A definition for a newly authored id, with the reserved export rows in place.
    pub fn seeded(id: impl Into<String>, reserved: &ReservedExports) -> Self {
        Self {
            export_mapping: reserved.seed_rows(),
            ..Self::new(id)
        }
    }

    /// Canonical copy of this definition. Equivalent to normalizing its JSON form.
    pub fn normalized(&self) -> Self {
        let mut def = self.clone();
        def.canonicalize();
        def
    }

    pub(crate) fn canonicalize(&mut self) {
        self.import_mapping.iter_mut().for_each(|f| f.canonicalize());
        self.export_mapping.iter_mut().for_each(|f| f.canonicalize());
        self.table_mapping.iter_mut().for_each(|t| t.canonicalize());
        self.return_table_mapping
            .iter_mut()
            .for_each(|t| t.canonicalize());
    }

    /// Positions of table blocks that have no fields yet.
    pub fn incomplete_tables(&self) -> Vec<(TableKind, usize)> {
        let input = self
            .table_mapping
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_incomplete())
            .map(|(i, _)| (TableKind::Input, i));
        let output = self
            .return_table_mapping
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_incomplete())
            .map(|(i, _)| (TableKind::Return, i));
        input.chain(output).collect()
    }

    pub fn to_value(&self) -> serde_json::Value {
        // Serializing plain strings, numbers and sequences cannot fail.
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for InterfaceDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(crate::normalize::normalize(&raw))
    }
}
