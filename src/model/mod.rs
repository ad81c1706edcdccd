//! The mapping data model.
//!
//! [`InterfaceDefinition`] exclusively owns four ordered collections. Scalar rows and
//! table columns share the [`Field`] shape, table parameters share [`TableBlock`]; the role
//! markers in [`role`] select the direction-specific JSON spelling.

pub mod definition;
pub mod field;
pub mod role;
pub mod table;

pub use definition::*;
pub use field::Field;
pub use role::{Column, Export, FieldRole, Import, Input, Output, TableRole};
pub use table::TableBlock;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects one of the two scalar collections of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Import,
    Export,
}

/// Selects one of the two table collections of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// `tableMapping`
    Input,
    /// `returnTableMapping`
    Return,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Import => write!(f, "importMapping"),
            ScalarKind::Export => write!(f, "exportMapping"),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Input => write!(f, "tableMapping"),
            TableKind::Return => write!(f, "returnTableMapping"),
        }
    }
}
