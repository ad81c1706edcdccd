use std::fmt::Debug;

/// Describes how a [`Field`](super::Field) is spelled and which attributes it carries
/// in a particular position of an interface definition.
///
/// The three roles share one data shape; they differ only in the JSON key that holds the
/// remote parameter name and in whether request-side attributes (`required`,
/// `defaultValue`) mean anything.
pub trait FieldRole: Debug + Clone + Copy + PartialEq + Eq + Default + Send + Sync + 'static {
    /// JSON key holding the remote parameter name.
    const SAP_KEY: &'static str;
    /// Every key accepted for the remote parameter name when reading, `SAP_KEY` first.
    const SAP_ALIASES: &'static [&'static str];
    /// Whether `required` and `defaultValue` are part of this role.
    const CARRIES_INPUT: bool;
    /// The `required` flag of a freshly added row, and of rows that omit the key.
    const REQUIRED_BY_DEFAULT: bool;
}

/// A scalar request value passed to the remote procedure as an import parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Import;

/// A scalar value returned by the remote procedure as an export parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Export;

/// A column inside a table block, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Column;

impl FieldRole for Import {
    const SAP_KEY: &'static str = "sapField";
    const SAP_ALIASES: &'static [&'static str] = &["sapField", "sap_field", "sapParam", "sap_param"];
    const CARRIES_INPUT: bool = true;
    const REQUIRED_BY_DEFAULT: bool = true;
}

impl FieldRole for Export {
    const SAP_KEY: &'static str = "sapParam";
    const SAP_ALIASES: &'static [&'static str] = &["sapParam", "sap_param", "sapField", "sap_field"];
    const CARRIES_INPUT: bool = false;
    const REQUIRED_BY_DEFAULT: bool = false;
}

impl FieldRole for Column {
    const SAP_KEY: &'static str = "sapField";
    const SAP_ALIASES: &'static [&'static str] = &["sapField", "sap_field", "sapParam", "sap_param"];
    const CARRIES_INPUT: bool = true;
    const REQUIRED_BY_DEFAULT: bool = false;
}

/// Describes how a [`TableBlock`](super::TableBlock) is spelled in a particular direction.
pub trait TableRole: Debug + Clone + Copy + PartialEq + Eq + Default + Send + Sync + 'static {
    /// JSON key holding the web-side list name.
    const LIST_KEY: &'static str;
    const LIST_ALIASES: &'static [&'static str];
    /// JSON key holding the remote table name.
    const TABLE_KEY: &'static str;
    const TABLE_ALIASES: &'static [&'static str];
    /// Whether `required` and `singleValue` are part of this role.
    const CARRIES_FLAGS: bool;
}

/// A request list sent to the remote procedure as a table parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Input;

/// A table returned by the remote procedure and exposed as a response list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Output;

impl TableRole for Input {
    const LIST_KEY: &'static str = "webFields";
    const LIST_ALIASES: &'static [&'static str] = &["webFields", "web_fields", "webField", "web_field"];
    const TABLE_KEY: &'static str = "sapTable";
    const TABLE_ALIASES: &'static [&'static str] = &["sapTable", "sap_table"];
    const CARRIES_FLAGS: bool = true;
}

impl TableRole for Output {
    const LIST_KEY: &'static str = "webReturnList";
    const LIST_ALIASES: &'static [&'static str] = &[
        "webReturnList",
        "web_return_list",
        "webField",
        "web_field",
    ];
    const TABLE_KEY: &'static str = "sapReturnTable";
    const TABLE_ALIASES: &'static [&'static str] = &[
        "sapReturnTable",
        "sap_return_table",
        "sapTable",
        "sap_table",
    ];
    const CARRIES_FLAGS: bool = false;
}
