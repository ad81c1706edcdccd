use super::field::Field;
use super::role::{Column, TableRole};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;

/// Correlates a web-side list with a remote table and owns the column mappings.
///
/// A block with no fields is valid but incomplete; see [`TableBlock::is_incomplete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock<R> {
    /// List key in the web request or response JSON.
    pub web_list: String,
    /// Name of the remote table parameter.
    pub sap_table: String,
    pub required: bool,
    /// The web side sends a single object instead of a list.
    pub single_value: bool,
    pub fields: Vec<Field<Column>>,
    role: PhantomData<R>,
}

impl<R: TableRole> TableBlock<R> {
    /// An empty, optional block with no fields.
    pub fn new() -> Self {
        Self {
            web_list: String::new(),
            sap_table: String::new(),
            required: false,
            single_value: false,
            fields: Vec::new(),
            role: PhantomData,
        }
    }

    pub fn with_web(mut self, web_list: impl Into<String>) -> Self {
        self.web_list = web_list.into();
        self
    }

    pub fn with_sap(mut self, sap_table: impl Into<String>) -> Self {
        self.sap_table = sap_table.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_single_value(mut self, single_value: bool) -> Self {
        self.single_value = single_value;
        self
    }

    pub fn with_field(mut self, field: Field<Column>) -> Self {
        self.fields.push(field);
        self
    }

    /// A block without any column mapping. It is kept and persisted, but renders as an
    /// error state and projects without columns.
    pub fn is_incomplete(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when any column has an authored default or example.
    pub fn has_sample(&self) -> bool {
        self.fields.iter().any(|f| f.has_sample())
    }

    pub(crate) fn canonicalize(&mut self) {
        if !R::CARRIES_FLAGS {
            self.required = false;
            self.single_value = false;
        }
        self.fields.iter_mut().for_each(|f| f.canonicalize());
    }
}

impl<R: TableRole> Default for TableBlock<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TableRole> Serialize for TableBlock<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if R::CARRIES_FLAGS { 5 } else { 3 };
        let mut state = serializer.serialize_struct("TableBlock", len)?;
        state.serialize_field(R::LIST_KEY, &self.web_list)?;
        state.serialize_field(R::TABLE_KEY, &self.sap_table)?;
        if R::CARRIES_FLAGS {
            state.serialize_field("singleValue", &self.single_value)?;
            state.serialize_field("required", &self.required)?;
        }
        state.serialize_field("fields", &self.fields)?;
        state.end()
    }
}

impl<'de, R: TableRole> Deserialize<'de> for TableBlock<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(crate::normalize::table_from_value(&raw))
    }
}
