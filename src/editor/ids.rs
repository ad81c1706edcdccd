use crate::model::{InterfaceDefinition, ScalarKind, TableKind};
use crate::mutation::{MappingKind, Mutation};
use std::fmt;

/// Opaque, session-scoped identity of a row, table block or table column.
///
/// Unlike positions, ids survive removals of other elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an element currently sits in the definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Scalar {
        kind: ScalarKind,
        index: usize,
    },
    Table {
        kind: TableKind,
        index: usize,
    },
    Field {
        kind: TableKind,
        table: usize,
        field: usize,
    },
}

/// Ids laid out parallel to the definition's collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct IdIndex {
    imports: Vec<ElementId>,
    exports: Vec<ElementId>,
    tables: Vec<(ElementId, Vec<ElementId>)>,
    returns: Vec<(ElementId, Vec<ElementId>)>,
}

/// Hands out ids that are never reused within a session.
#[derive(Debug, Default)]
pub(super) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub(super) fn next(&mut self) -> ElementId {
        self.next += 1;
        ElementId(self.next)
    }
}

impl IdIndex {
    /// Fresh ids for every element of `def`.
    pub(super) fn assign(def: &InterfaceDefinition, ids: &mut IdAllocator) -> Self {
        let imports = def.import_mapping.iter().map(|_| ids.next()).collect();
        let exports = def.export_mapping.iter().map(|_| ids.next()).collect();
        let tables = def
            .table_mapping
            .iter()
            .map(|t| (ids.next(), t.fields.iter().map(|_| ids.next()).collect()))
            .collect();
        let returns = def
            .return_table_mapping
            .iter()
            .map(|t| (ids.next(), t.fields.iter().map(|_| ids.next()).collect()))
            .collect();
        Self {
            imports,
            exports,
            tables,
            returns,
        }
    }

    /// Mirrors a structural mutation that has already been applied to the definition.
    /// Returns the id of the element it created, if any.
    pub(super) fn track(&mut self, mutation: &Mutation, ids: &mut IdAllocator) -> Option<ElementId> {
        match mutation {
            Mutation::AddScalarRow(kind) => {
                let id = ids.next();
                self.push_scalar(*kind, id);
                Some(id)
            }
            Mutation::AddTableBlock(kind) => {
                let id = ids.next();
                self.push_table(*kind, id);
                Some(id)
            }
            Mutation::RemoveRow { kind, index, .. } => {
                match kind {
                    MappingKind::Import => self.scalars_mut(ScalarKind::Import).remove(*index),
                    MappingKind::Export => self.scalars_mut(ScalarKind::Export).remove(*index),
                    MappingKind::Table => self.tables_mut(TableKind::Input).remove(*index).0,
                    MappingKind::Return => self.tables_mut(TableKind::Return).remove(*index).0,
                };
                None
            }
            Mutation::AddField { kind, table } => {
                let id = ids.next();
                self.push_field(*kind, *table, id);
                Some(id)
            }
            Mutation::RemoveField { kind, table, field } => {
                self.tables_mut(*kind)[*table].1.remove(*field);
                None
            }
            Mutation::SetScalar { .. }
            | Mutation::SetTableProp { .. }
            | Mutation::SetField { .. }
            | Mutation::SetHeader(_) => None,
        }
    }

    pub(super) fn push_scalar(&mut self, kind: ScalarKind, id: ElementId) {
        self.scalars_mut(kind).push(id);
    }

    pub(super) fn push_table(&mut self, kind: TableKind, id: ElementId) {
        self.tables_mut(kind).push((id, Vec::new()));
    }

    pub(super) fn push_field(&mut self, kind: TableKind, table: usize, id: ElementId) {
        self.tables_mut(kind)[table].1.push(id);
    }

    pub(super) fn locate(&self, id: ElementId) -> Option<Location> {
        let scalar = |kind: ScalarKind, ids: &[ElementId]| {
            ids.iter()
                .position(|x| *x == id)
                .map(|index| Location::Scalar { kind, index })
        };
        let table = |kind: TableKind, blocks: &[(ElementId, Vec<ElementId>)]| {
            blocks.iter().enumerate().find_map(|(t, (block_id, fields))| {
                if *block_id == id {
                    return Some(Location::Table { kind, index: t });
                }
                fields.iter().position(|x| *x == id).map(|field| Location::Field {
                    kind,
                    table: t,
                    field,
                })
            })
        };
        scalar(ScalarKind::Import, &self.imports)
            .or_else(|| scalar(ScalarKind::Export, &self.exports))
            .or_else(|| table(TableKind::Input, &self.tables))
            .or_else(|| table(TableKind::Return, &self.returns))
    }

    pub(super) fn scalar_id(&self, kind: ScalarKind, index: usize) -> Option<ElementId> {
        let ids = match kind {
            ScalarKind::Import => &self.imports,
            ScalarKind::Export => &self.exports,
        };
        ids.get(index).copied()
    }

    pub(super) fn table_id(&self, kind: TableKind, index: usize) -> Option<ElementId> {
        self.tables(kind).get(index).map(|(id, _)| *id)
    }

    pub(super) fn field_id(&self, kind: TableKind, table: usize, field: usize) -> Option<ElementId> {
        self.tables(kind)
            .get(table)
            .and_then(|(_, fields)| fields.get(field).copied())
    }

    fn tables(&self, kind: TableKind) -> &Vec<(ElementId, Vec<ElementId>)> {
        match kind {
            TableKind::Input => &self.tables,
            TableKind::Return => &self.returns,
        }
    }

    fn scalars_mut(&mut self, kind: ScalarKind) -> &mut Vec<ElementId> {
        match kind {
            ScalarKind::Import => &mut self.imports,
            ScalarKind::Export => &mut self.exports,
        }
    }

    fn tables_mut(&mut self, kind: TableKind) -> &mut Vec<(ElementId, Vec<ElementId>)> {
        match kind {
            TableKind::Input => &mut self.tables,
            TableKind::Return => &mut self.returns,
        }
    }
}
