//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Change order is the emission order of the engine, so serialized diffs are
//! deterministic for identical inputs.

use crate::errors::{GdError, GdErrorKind};
use crate::identity::GlobalId;
use crate::metamodel::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One detected change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change_type", rename_all = "snake_case")]
pub enum Change {
    /// Object present only in the right graph
    NewObject { global_id: GlobalId },
    /// Object present only in the left graph
    ObjectRemoved { global_id: GlobalId },
    /// Primitive or value-typed property changed
    ValueChange {
        global_id: GlobalId,
        property: String,
        left: Value,
        right: Value,
    },
    /// Entity or value-object reference changed
    ReferenceChange {
        global_id: GlobalId,
        property: String,
        left: Option<GlobalId>,
        right: Option<GlobalId>,
    },
    ListChange {
        global_id: GlobalId,
        property: String,
        changes: Vec<ElementChange>,
    },
    SetChange {
        global_id: GlobalId,
        property: String,
        added: Vec<Value>,
        removed: Vec<Value>,
    },
    MapChange {
        global_id: GlobalId,
        property: String,
        changes: Vec<EntryChange>,
    },
}

impl Change {
    pub fn global_id(&self) -> &GlobalId {
        match self {
            Change::NewObject { global_id }
            | Change::ObjectRemoved { global_id }
            | Change::ValueChange { global_id, .. }
            | Change::ReferenceChange { global_id, .. }
            | Change::ListChange { global_id, .. }
            | Change::SetChange { global_id, .. }
            | Change::MapChange { global_id, .. } => global_id,
        }
    }

    /// Changed property, `None` for object-level changes
    pub fn property(&self) -> Option<&str> {
        match self {
            Change::NewObject { .. } | Change::ObjectRemoved { .. } => None,
            Change::ValueChange { property, .. }
            | Change::ReferenceChange { property, .. }
            | Change::ListChange { property, .. }
            | Change::SetChange { property, .. }
            | Change::MapChange { property, .. } => Some(property),
        }
    }

    /// Serialized tag of the variant
    pub fn change_type(&self) -> &'static str {
        match self {
            Change::NewObject { .. } => "new_object",
            Change::ObjectRemoved { .. } => "object_removed",
            Change::ValueChange { .. } => "value_change",
            Change::ReferenceChange { .. } => "reference_change",
            Change::ListChange { .. } => "list_change",
            Change::SetChange { .. } => "set_change",
            Change::MapChange { .. } => "map_change",
        }
    }
}

/// Change to one list element
///
/// `index` is `None` when the list was compared as a multiset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element_change", rename_all = "snake_case")]
pub enum ElementChange {
    ValueAdded { index: Option<usize>, value: Value },
    ValueRemoved { index: Option<usize>, value: Value },
    ElementValueChange { index: usize, left: Value, right: Value },
}

/// Change to one map entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry_change", rename_all = "snake_case")]
pub enum EntryChange {
    EntryAdded { key: String, value: Value },
    EntryRemoved { key: String, value: Value },
    EntryValueChange { key: String, left: Value, right: Value },
}

/// Ordered list of changes between two object graphs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diff {
    changes: Vec<Change>,
}

impl Diff {
    pub fn new(changes: Vec<Change>) -> Self {
        Self { changes }
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Changes affecting one object, in emission order
    pub fn changes_for(&self, global_id: &GlobalId) -> Vec<&Change> {
        self.changes
            .iter()
            .filter(|c| c.global_id() == global_id)
            .collect()
    }

    /// Number of changes per `change_type`
    pub fn count_by_type(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for change in &self.changes {
            *counts.entry(change.change_type()).or_insert(0) += 1;
        }
        counts
    }

    /// Pretty JSON for audit storage
    ///
    /// # Errors
    ///
    /// `Serialization` if a value cannot be represented in JSON.
    pub fn to_json(&self) -> Result<String, GdError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GdError::new(GdErrorKind::Serialization)
                .with_op("Diff::to_json")
                .with_message(e.to_string())
        })
    }
}
