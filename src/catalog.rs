use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The data types a mapped field can declare on the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SapType {
    String,
    Char,
    Decimal,
    Number,
    Date,
    Datetime,
    Int,
    Array,
    Struct,
    Table,
}

impl SapType {
    /// Every supported type, in the order authoring tools present them.
    pub const ALL: [SapType; 10] = [
        SapType::String,
        SapType::Char,
        SapType::Decimal,
        SapType::Number,
        SapType::Date,
        SapType::Datetime,
        SapType::Int,
        SapType::Array,
        SapType::Struct,
        SapType::Table,
    ];

    /// The type assigned to fields that do not declare one.
    pub const DEFAULT: SapType = SapType::Char;

    pub fn as_str(&self) -> &'static str {
        match self {
            SapType::String => "STRING",
            SapType::Char => "CHAR",
            SapType::Decimal => "DECIMAL",
            SapType::Number => "NUMBER",
            SapType::Date => "DATE",
            SapType::Datetime => "DATETIME",
            SapType::Int => "INT",
            SapType::Array => "ARRAY",
            SapType::Struct => "STRUCT",
            SapType::Table => "TABLE",
        }
    }

    /// Case-insensitive lookup of a catalog entry by name.
    pub fn parse(name: &str) -> Option<SapType> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for SapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the catalog entries whose name contains `query`, ignoring case.
///
/// Results keep catalog order. An empty (or all-whitespace) query matches everything.
pub fn search(query: &str) -> Vec<SapType> {
    let needle = query.trim().to_ascii_uppercase();
    SapType::ALL
        .into_iter()
        .filter(|t| t.as_str().contains(needle.as_str()))
        .collect_vec()
}
