use super::role::FieldRole;
use crate::catalog::SapType;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;

/// A single web key <-> remote parameter correlation.
///
/// The role parameter `R` decides the JSON spelling of the remote name (`sapField` or
/// `sapParam`) and whether `required`/`defaultValue` are meaningful. For roles that do not
/// carry them, they are cleared by normalization and never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<R> {
    /// Key in the web request or response JSON.
    pub web_field: String,
    /// Name of the remote parameter or table column.
    pub sap_name: String,
    /// Declared remote type, normally one of the [`SapType`] catalog names.
    pub data_type: String,
    pub size: u32,
    pub required: bool,
    pub default_value: String,
    pub example: String,
    pub remarks: String,
    role: PhantomData<R>,
}

impl<R: FieldRole> Field<R> {
    /// A blank row with the defaults of role `R`.
    pub fn new() -> Self {
        Self {
            web_field: String::new(),
            sap_name: String::new(),
            data_type: SapType::DEFAULT.as_str().to_string(),
            size: 0,
            required: R::REQUIRED_BY_DEFAULT,
            default_value: String::new(),
            example: String::new(),
            remarks: String::new(),
            role: PhantomData,
        }
    }

    pub fn with_web(mut self, web_field: impl Into<String>) -> Self {
        self.web_field = web_field.into();
        self
    }

    pub fn with_sap(mut self, sap_name: impl Into<String>) -> Self {
        self.sap_name = sap_name.into();
        self
    }

    pub fn with_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    /// True when an authored default or example exists.
    pub fn has_sample(&self) -> bool {
        !self.default_value.is_empty() || !self.example.is_empty()
    }

    /// The value used when building a sample request: default, else example, else empty.
    pub fn sample_value(&self) -> &str {
        if !self.default_value.is_empty() {
            &self.default_value
        } else {
            &self.example
        }
    }

    /// Whether this field appears in a projected request body.
    pub fn is_projected(&self) -> bool {
        !self.web_field.is_empty() && (self.required || self.has_sample())
    }

    /// The catalog entry for the declared type, if it is a known one.
    pub fn sap_type(&self) -> Option<SapType> {
        SapType::parse(&self.data_type)
    }

    /// Brings an already typed field into canonical form.
    pub(crate) fn canonicalize(&mut self) {
        let trimmed = self.data_type.trim();
        self.data_type = if trimmed.is_empty() {
            SapType::DEFAULT.as_str().to_string()
        } else {
            trimmed.to_string()
        };
        if !R::CARRIES_INPUT {
            self.required = false;
            self.default_value.clear();
        }
    }
}

impl<R: FieldRole> Default for Field<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: FieldRole> Serialize for Field<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if R::CARRIES_INPUT { 8 } else { 6 };
        let mut state = serializer.serialize_struct("Field", len)?;
        state.serialize_field("webField", &self.web_field)?;
        state.serialize_field(R::SAP_KEY, &self.sap_name)?;
        state.serialize_field("type", &self.data_type)?;
        state.serialize_field("size", &self.size)?;
        if R::CARRIES_INPUT {
            state.serialize_field("required", &self.required)?;
            state.serialize_field("defaultValue", &self.default_value)?;
        }
        state.serialize_field("example", &self.example)?;
        state.serialize_field("remarks", &self.remarks)?;
        state.end()
    }
}

impl<'de, R: FieldRole> Deserialize<'de> for Field<R> {
    /// Accepts any JSON shape; see [`crate::normalize`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(crate::normalize::field_from_value(&raw))
    }
}
