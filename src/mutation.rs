//! Structural edits of an [`InterfaceDefinition`].
//!
//! Elements are addressed purely by position. Removing an element shifts every later
//! element down by one, so an index taken before a removal may point at a different
//! element afterwards. Indices are a caller precondition: out-of-range positions panic,
//! exactly like indexing a `Vec`. Point edits store what they are given; coercion is left
//! to [`crate::normalize`] at load and save boundaries. Edits of attributes a role does not
//! carry, such as `required` on an export row, are ignored.
//!
//! Every edit is also available as a [`Mutation`] value, which the editing session uses to
//! record history and which can be applied purely to produce a new snapshot.

use crate::error::MutationError;
use crate::model::{
    ExportField, Field, FieldRole, ImportField, InputTable, InterfaceDefinition, ReservedExports,
    ReturnTable, ScalarKind, TableBlock, TableField, TableKind, TableRole,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Any of the four top-level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingKind {
    Import,
    Export,
    Table,
    Return,
}

impl From<ScalarKind> for MappingKind {
    fn from(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Import => MappingKind::Import,
            ScalarKind::Export => MappingKind::Export,
        }
    }
}

impl From<TableKind> for MappingKind {
    fn from(kind: TableKind) -> Self {
        match kind {
            TableKind::Input => MappingKind::Table,
            TableKind::Return => MappingKind::Return,
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingKind::Import => write!(f, "{}", ScalarKind::Import),
            MappingKind::Export => write!(f, "{}", ScalarKind::Export),
            MappingKind::Table => write!(f, "{}", TableKind::Input),
            MappingKind::Return => write!(f, "{}", TableKind::Return),
        }
    }
}

/// Whether the caller has explicitly confirmed a guarded removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Confirmation {
    #[default]
    Unconfirmed,
    Confirmed,
}

/// A point edit of one attribute of a scalar row or table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldEdit {
    WebField(String),
    SapName(String),
    DataType(String),
    Size(u32),
    Required(bool),
    DefaultValue(String),
    Example(String),
    Remarks(String),
}

impl FieldEdit {
    /// Whether this edit touches an attribute that fields of role `R` carry.
    pub fn applies_to<R: FieldRole>(&self) -> bool {
        R::CARRIES_INPUT || !matches!(self, FieldEdit::Required(_) | FieldEdit::DefaultValue(_))
    }

    /// Stores the edited value on `field`.
    ///
    /// `Required` and `DefaultValue` are ignored on export rows, which never carry them.
    pub fn apply_to<R: FieldRole>(&self, field: &mut Field<R>) {
        if !self.applies_to::<R>() {
            return;
        }
        match self {
            FieldEdit::WebField(v) => field.web_field = v.clone(),
            FieldEdit::SapName(v) => field.sap_name = v.clone(),
            FieldEdit::DataType(v) => field.data_type = v.clone(),
            FieldEdit::Size(v) => field.size = *v,
            FieldEdit::Required(v) => field.required = *v,
            FieldEdit::DefaultValue(v) => field.default_value = v.clone(),
            FieldEdit::Example(v) => field.example = v.clone(),
            FieldEdit::Remarks(v) => field.remarks = v.clone(),
        }
    }
}

/// A point edit of one property of a table block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEdit {
    WebList(String),
    SapTable(String),
    Required(bool),
    SingleValue(bool),
}

impl TableEdit {
    /// Whether this edit touches a property that blocks of role `R` carry.
    pub fn applies_to<R: TableRole>(&self) -> bool {
        R::CARRIES_FLAGS || !matches!(self, TableEdit::Required(_) | TableEdit::SingleValue(_))
    }

    /// Stores the edited value on `table`.
    ///
    /// `Required` and `SingleValue` are ignored on return blocks, which never carry them.
    pub fn apply_to<R: TableRole>(&self, table: &mut TableBlock<R>) {
        if !self.applies_to::<R>() {
            return;
        }
        match self {
            TableEdit::WebList(v) => table.web_list = v.clone(),
            TableEdit::SapTable(v) => table.sap_table = v.clone(),
            TableEdit::Required(v) => table.required = *v,
            TableEdit::SingleValue(v) => table.single_value = *v,
        }
    }
}

/// A point edit of the definition's own attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderEdit {
    Id(String),
    Name(String),
    Description(String),
    SapModule(String),
    RfcFunction(String),
    Executable(bool),
}

/// One structural edit, as a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    AddScalarRow(ScalarKind),
    AddTableBlock(TableKind),
    RemoveRow {
        kind: MappingKind,
        index: usize,
        confirmation: Confirmation,
    },
    AddField {
        kind: TableKind,
        table: usize,
    },
    RemoveField {
        kind: TableKind,
        table: usize,
        field: usize,
    },
    SetScalar {
        kind: ScalarKind,
        index: usize,
        edit: FieldEdit,
    },
    SetTableProp {
        kind: TableKind,
        index: usize,
        edit: TableEdit,
    },
    SetField {
        kind: TableKind,
        table: usize,
        field: usize,
        edit: FieldEdit,
    },
    SetHeader(HeaderEdit),
}

impl Mutation {
    /// Applies the edit to a copy of `def`, leaving the original snapshot untouched.
    pub fn apply(
        &self,
        def: &InterfaceDefinition,
        reserved: &ReservedExports,
    ) -> Result<InterfaceDefinition, MutationError> {
        let mut next = def.clone();
        self.apply_in_place(&mut next, reserved)?;
        Ok(next)
    }

    /// Applies the edit to `def`. On error `def` is left unchanged.
    pub fn apply_in_place(
        &self,
        def: &mut InterfaceDefinition,
        reserved: &ReservedExports,
    ) -> Result<(), MutationError> {
        match self {
            Mutation::AddScalarRow(kind) => {
                def.add_scalar_row(*kind);
            }
            Mutation::AddTableBlock(kind) => {
                def.add_table_block(*kind);
            }
            Mutation::RemoveRow {
                kind,
                index,
                confirmation,
            } => {
                if *confirmation == Confirmation::Unconfirmed {
                    def.guard_removal(*kind, *index, reserved)?;
                }
                def.remove_row(*kind, *index);
            }
            Mutation::AddField { kind, table } => {
                def.add_field(*kind, *table);
            }
            Mutation::RemoveField { kind, table, field } => {
                def.remove_field(*kind, *table, *field);
            }
            Mutation::SetScalar { kind, index, edit } => def.set_scalar(*kind, *index, edit),
            Mutation::SetTableProp { kind, index, edit } => {
                def.set_table_prop(*kind, *index, edit)
            }
            Mutation::SetField {
                kind,
                table,
                field,
                edit,
            } => def.set_field(*kind, *table, *field, edit),
            Mutation::SetHeader(edit) => def.set_header(edit),
        }
        Ok(())
    }
}

impl InterfaceDefinition {
    /// Appends a blank scalar row and returns its index.
    ///
    /// Import rows start out required; export rows have no `required` semantics.
    pub fn add_scalar_row(&mut self, kind: ScalarKind) -> usize {
        match kind {
            ScalarKind::Import => {
                self.import_mapping.push(ImportField::new());
                self.import_mapping.len() - 1
            }
            ScalarKind::Export => {
                self.export_mapping.push(ExportField::new());
                self.export_mapping.len() - 1
            }
        }
    }

    /// Appends an empty table block (`fields = []`) and returns its index.
    pub fn add_table_block(&mut self, kind: TableKind) -> usize {
        match kind {
            TableKind::Input => {
                self.table_mapping.push(InputTable::new());
                self.table_mapping.len() - 1
            }
            TableKind::Return => {
                self.return_table_mapping.push(ReturnTable::new());
                self.return_table_mapping.len() - 1
            }
        }
    }

    /// Checks the reserved-export guardrail for removing `index` from `kind`.
    ///
    /// Fails with [`MutationError::ConfirmationRequired`] when the row is one of the
    /// reserved status/message export parameters.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is `Export` and `index` is out of range.
    pub fn guard_removal(
        &self,
        kind: MappingKind,
        index: usize,
        reserved: &ReservedExports,
    ) -> Result<(), MutationError> {
        if kind == MappingKind::Export {
            let row = &self.export_mapping[index];
            if reserved.contains(&row.sap_name) {
                return Err(MutationError::ConfirmationRequired {
                    sap_param: row.sap_name.clone(),
                    index,
                });
            }
        }
        Ok(())
    }

    /// Removes the element at `index`; later elements shift down by one.
    ///
    /// This does not apply the reserved-export guardrail; see [`Mutation::RemoveRow`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_row(&mut self, kind: MappingKind, index: usize) {
        match kind {
            MappingKind::Import => {
                self.import_mapping.remove(index);
            }
            MappingKind::Export => {
                self.export_mapping.remove(index);
            }
            MappingKind::Table => {
                self.table_mapping.remove(index);
            }
            MappingKind::Return => {
                self.return_table_mapping.remove(index);
            }
        }
    }

    /// Appends a blank, optional column to a table block and returns its index.
    pub fn add_field(&mut self, kind: TableKind, table: usize) -> usize {
        let fields = self.table_fields_mut(kind, table);
        fields.push(TableField::new());
        fields.len() - 1
    }

    /// # Panics
    ///
    /// Panics if `table` or `field` is out of range.
    pub fn remove_field(&mut self, kind: TableKind, table: usize, field: usize) {
        self.table_fields_mut(kind, table).remove(field);
    }

    pub fn set_scalar(&mut self, kind: ScalarKind, index: usize, edit: &FieldEdit) {
        match kind {
            ScalarKind::Import => edit.apply_to(&mut self.import_mapping[index]),
            ScalarKind::Export => edit.apply_to(&mut self.export_mapping[index]),
        }
    }

    /// Edits a table block property. Flag edits on return blocks are ignored.
    pub fn set_table_prop(&mut self, kind: TableKind, index: usize, edit: &TableEdit) {
        match kind {
            TableKind::Input => edit.apply_to(&mut self.table_mapping[index]),
            TableKind::Return => edit.apply_to(&mut self.return_table_mapping[index]),
        }
    }

    pub fn set_field(&mut self, kind: TableKind, table: usize, field: usize, edit: &FieldEdit) {
        edit.apply_to(&mut self.table_fields_mut(kind, table)[field]);
    }

    pub fn set_header(&mut self, edit: &HeaderEdit) {
        match edit {
            HeaderEdit::Id(v) => self.id = v.clone(),
            HeaderEdit::Name(v) => self.name = v.clone(),
            HeaderEdit::Description(v) => self.description = v.clone(),
            HeaderEdit::SapModule(v) => self.sap_module = v.clone(),
            HeaderEdit::RfcFunction(v) => self.rfc_function = v.clone(),
            HeaderEdit::Executable(v) => self.executable = *v,
        }
    }

    fn table_fields_mut(&mut self, kind: TableKind, table: usize) -> &mut Vec<TableField> {
        match kind {
            TableKind::Input => &mut self.table_mapping[table].fields,
            TableKind::Return => &mut self.return_table_mapping[table].fields,
        }
    }
}
