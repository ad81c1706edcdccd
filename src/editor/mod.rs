//! Editing session over one definition.
//!
//! The session owns the working snapshot and treats it as immutable: every edit produces a
//! new snapshot through [`Mutation::apply`], and the previous one goes onto the undo stack.
//! Elements can be addressed by position, like [`crate::mutation`], or by [`ElementId`],
//! which stays attached to an element across removals of its siblings.

mod ids;

pub use ids::{ElementId, Location};

use crate::config::MapperConfig;
use crate::error::EditError;
use crate::model::{InterfaceDefinition, ScalarKind, TableKind};
use crate::mutation::{Confirmation, FieldEdit, HeaderEdit, Mutation, TableEdit};
use crate::projection::{InvocationPayload, project};
use ids::{IdAllocator, IdIndex};
use std::collections::VecDeque;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct Snapshot {
    def: InterfaceDefinition,
    ids: IdIndex,
}

/// A working copy of one definition with undo/redo and stable element ids.
#[derive(Debug)]
pub struct Editor {
    config: MapperConfig,
    current: Snapshot,
    baseline: InterfaceDefinition,
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    ids: IdAllocator,
    is_new: bool,
}

impl Editor {
    /// Opens a session on a loaded definition. The input is normalized first.
    pub fn open(def: &InterfaceDefinition, config: MapperConfig) -> Self {
        Self::start(def.normalized(), config, false)
    }

    /// Opens a session on a brand-new definition seeded with the reserved export rows.
    pub fn create(id: impl Into<String>, config: MapperConfig) -> Self {
        let def = config.new_definition(id);
        Self::start(def, config, true)
    }

    fn start(def: InterfaceDefinition, config: MapperConfig, is_new: bool) -> Self {
        let mut ids = IdAllocator::default();
        let index = IdIndex::assign(&def, &mut ids);
        Self {
            config,
            baseline: def.clone(),
            current: Snapshot { def, ids: index },
            undo: VecDeque::new(),
            redo: Vec::new(),
            ids,
            is_new,
        }
    }

    pub fn definition(&self) -> &InterfaceDefinition {
        &self.current.def
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Whether the definition has never been saved in this session.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Whether the working copy differs from what was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.current.def.normalized() != self.baseline
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Applies `mutation` and returns the id of the element it created, if any.
    ///
    /// A failed mutation leaves the snapshot and the history untouched.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Option<ElementId>, EditError> {
        let def = mutation.apply(&self.current.def, &self.config.reserved)?;
        let mut ids = self.current.ids.clone();
        let created = ids.track(&mutation, &mut self.ids);
        trace!(?mutation, "Applied mutation");
        self.commit(Snapshot { def, ids });
        Ok(created)
    }

    fn commit(&mut self, next: Snapshot) {
        let previous = std::mem::replace(&mut self.current, next);
        self.push_undo(previous);
        self.redo.clear();
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.config.history_limit {
            self.undo.pop_front();
        }
    }

    pub fn undo(&mut self) -> Result<(), EditError> {
        let previous = self.undo.pop_back().ok_or(EditError::NoHistory("undo"))?;
        let current = std::mem::replace(&mut self.current, previous);
        self.redo.push(current);
        debug!(remaining = self.undo.len(), "Undo");
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditError> {
        let next = self.redo.pop().ok_or(EditError::NoHistory("redo"))?;
        let current = std::mem::replace(&mut self.current, next);
        self.push_undo(current);
        debug!(remaining = self.redo.len(), "Redo");
        Ok(())
    }

    /// Replaces the working copy wholesale with a freshly saved or reloaded snapshot.
    ///
    /// History is dropped and every element receives a new id.
    pub fn reset(&mut self, def: &InterfaceDefinition) {
        let def = def.normalized();
        self.current = Snapshot {
            ids: IdIndex::assign(&def, &mut self.ids),
            def: def.clone(),
        };
        self.baseline = def;
        self.undo.clear();
        self.redo.clear();
        self.is_new = false;
    }

    /// Current position of the element, or `None` if it no longer exists.
    pub fn locate(&self, id: ElementId) -> Option<Location> {
        self.current.ids.locate(id)
    }

    pub fn scalar_id(&self, kind: ScalarKind, index: usize) -> Option<ElementId> {
        self.current.ids.scalar_id(kind, index)
    }

    pub fn table_id(&self, kind: TableKind, index: usize) -> Option<ElementId> {
        self.current.ids.table_id(kind, index)
    }

    pub fn field_id(&self, kind: TableKind, table: usize, field: usize) -> Option<ElementId> {
        self.current.ids.field_id(kind, table, field)
    }

    pub fn add_scalar_row(&mut self, kind: ScalarKind) -> ElementId {
        let mut next = self.current.clone();
        next.def.add_scalar_row(kind);
        let id = self.ids.next();
        next.ids.push_scalar(kind, id);
        self.commit(next);
        id
    }

    pub fn add_table_block(&mut self, kind: TableKind) -> ElementId {
        let mut next = self.current.clone();
        next.def.add_table_block(kind);
        let id = self.ids.next();
        next.ids.push_table(kind, id);
        self.commit(next);
        id
    }

    /// Appends a column to the table block identified by `table`.
    pub fn add_field(&mut self, table: ElementId) -> Result<ElementId, EditError> {
        let Location::Table { kind, index } = self.require(table)? else {
            return Err(EditError::UnknownElement(table.get()));
        };
        let mut next = self.current.clone();
        next.def.add_field(kind, index);
        let id = self.ids.next();
        next.ids.push_field(kind, index, id);
        self.commit(next);
        Ok(id)
    }

    /// Removes a row, table block or column by id.
    ///
    /// Removing a reserved export row without [`Confirmation::Confirmed`] fails and changes
    /// nothing.
    pub fn remove(&mut self, id: ElementId, confirmation: Confirmation) -> Result<(), EditError> {
        let mutation = match self.require(id)? {
            Location::Scalar { kind, index } => Mutation::RemoveRow {
                kind: kind.into(),
                index,
                confirmation,
            },
            Location::Table { kind, index } => Mutation::RemoveRow {
                kind: kind.into(),
                index,
                confirmation,
            },
            Location::Field { kind, table, field } => Mutation::RemoveField { kind, table, field },
        };
        self.apply(mutation).map(|_| ())
    }

    /// Edits an attribute of a scalar row or table column.
    pub fn edit_field(&mut self, id: ElementId, edit: FieldEdit) -> Result<(), EditError> {
        let mutation = match self.require(id)? {
            Location::Scalar { kind, index } => Mutation::SetScalar { kind, index, edit },
            Location::Field { kind, table, field } => Mutation::SetField {
                kind,
                table,
                field,
                edit,
            },
            Location::Table { .. } => return Err(EditError::UnknownElement(id.get())),
        };
        self.apply(mutation).map(|_| ())
    }

    pub fn edit_table(&mut self, id: ElementId, edit: TableEdit) -> Result<(), EditError> {
        match self.require(id)? {
            Location::Table { kind, index } => self
                .apply(Mutation::SetTableProp { kind, index, edit })
                .map(|_| ()),
            _ => Err(EditError::UnknownElement(id.get())),
        }
    }

    pub fn edit_header(&mut self, edit: HeaderEdit) -> Result<(), EditError> {
        self.apply(Mutation::SetHeader(edit)).map(|_| ())
    }

    /// Projects the working copy without the executable check, for display.
    pub fn preview(&self, user_id: Option<&str>) -> InvocationPayload {
        project(&self.current.def, Some(self.user_or_default(user_id)))
    }

    /// Projects the working copy for an actual invocation.
    ///
    /// Fails with [`EditError::NotExecutable`] unless the definition is marked executable.
    pub fn execute(&self, user_id: Option<&str>) -> Result<InvocationPayload, EditError> {
        if !self.current.def.executable {
            return Err(EditError::NotExecutable(self.current.def.id.clone()));
        }
        Ok(self.preview(user_id))
    }

    fn user_or_default<'a>(&'a self, user_id: Option<&'a str>) -> &'a str {
        user_id.unwrap_or(&self.config.default_user_id)
    }

    fn require(&self, id: ElementId) -> Result<Location, EditError> {
        self.locate(id).ok_or(EditError::UnknownElement(id.get()))
    }
}
