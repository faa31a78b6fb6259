//! Back-office records and their assignable fields.
//!
//! A record is the host side of a selector: it holds the durable selected
//! id per field, while a selector only mirrors it while the popup is open.

use std::collections::HashMap;

use crate::error::{LifecycleError, LifecycleResult};
use crate::lifecycle::RecordStatus;
use crate::picker::Picker;
use crate::selector::{ItemId, SelectableItem};
use crate::source::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Campaign,
    Agent,
}

impl RecordKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            RecordKind::Campaign => "Campaign",
            RecordKind::Agent => "Agent",
        }
    }

    /// Entity kinds that can be assigned to records of this kind
    pub fn fields(&self) -> &'static [EntityKind] {
        match self {
            RecordKind::Campaign => &[EntityKind::Agent, EntityKind::City, EntityKind::Client],
            RecordKind::Agent => &[EntityKind::City],
        }
    }
}

/// A confirmed selection persisted on a record
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: ItemId,
    pub label: String,
}

impl From<&SelectableItem> for Assignment {
    fn from(item: &SelectableItem) -> Self {
        Self {
            id: item.id.clone(),
            label: item.label.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub kind: RecordKind,
    pub status: RecordStatus,
    assignments: HashMap<EntityKind, Assignment>,
}

impl Record {
    pub fn new(id: i64, name: impl Into<String>, status: RecordStatus) -> Self {
        Self {
            id,
            name: name.into(),
            kind: status.kind(),
            status,
            assignments: HashMap::new(),
        }
    }

    pub fn accepts(&self, field: EntityKind) -> bool {
        self.kind.fields().contains(&field)
    }

    pub fn assignment(&self, field: EntityKind) -> Option<&Assignment> {
        self.assignments.get(&field)
    }

    /// The id a selector for `field` should open with
    pub fn selected_id(&self, field: EntityKind) -> Option<ItemId> {
        self.assignment(field).map(|a| a.id.clone())
    }

    /// Set or clear a field. Returns false if the field does not apply.
    pub fn assign(&mut self, field: EntityKind, value: Option<Assignment>) -> bool {
        if !self.accepts(field) {
            return false;
        }
        match value {
            Some(assignment) => {
                self.assignments.insert(field, assignment);
            }
            None => {
                self.assignments.remove(&field);
            }
        }
        true
    }

    pub fn set_status(&mut self, target: RecordStatus) -> LifecycleResult<()> {
        self.status = self.status.transition(target)?;
        Ok(())
    }
}

/// Ordered record list with a highlighted row
#[derive(Debug, Default)]
pub struct RecordBook {
    records: Vec<Record>,
    highlighted: usize,
}

impl RecordBook {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            highlighted: 0,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn highlighted_record(&self) -> Option<&Record> {
        self.records.get(self.highlighted)
    }

    pub fn get(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    pub fn set_status(&mut self, id: i64, target: RecordStatus) -> LifecycleResult<()> {
        self.get_mut(id)
            .ok_or(LifecycleError::RecordNotFound(id))?
            .set_status(target)
    }
}

impl Picker for RecordBook {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    fn set_highlighted_index(&mut self, index: usize) {
        self.highlighted = index;
    }
}
