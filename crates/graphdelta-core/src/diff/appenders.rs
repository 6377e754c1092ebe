//! Per-kind property comparison.
//!
//! Each comparison reads both sides through a [`NodePair`], so real and fake
//! pairs are handled identically. Values are compared in sanitized,
//! dehydrated form; entity and value-object properties compare by referenced
//! global id only, and changes inside an embedded value object surface on
//! that value object's own node.

use crate::diff::model::{Change, ElementChange, EntryChange};
use crate::diff::options::{DiffOptions, ListCompareAlgorithm};
use crate::diff::pair::NodePair;
use crate::metamodel::{Property, PropertyType, Value};
use std::collections::BTreeMap;

/// Change of `property` between the two sides of `pair`, if any
pub(crate) fn property_change(
    pair: &NodePair<'_, '_>,
    property: &Property,
    property_type: &PropertyType<'_>,
    options: &DiffOptions,
) -> Option<Change> {
    let global_id = pair.global_id().clone();
    let name = property.name().to_string();

    match unwrap_optional(property_type) {
        PropertyType::Entity(_) | PropertyType::ValueObject(_) => {
            let left = pair.left_reference(property).cloned();
            let right = pair.right_reference(property).cloned();
            (left != right).then_some(Change::ReferenceChange {
                global_id,
                property: name,
                left,
                right,
            })
        }
        PropertyType::PrimitiveOrValue(_) => {
            let left = pair.left_dehydrated_property_value_and_sanitize(property, property_type);
            let right = pair.right_dehydrated_property_value_and_sanitize(property, property_type);
            (left != right).then_some(Change::ValueChange {
                global_id,
                property: name,
                left,
                right,
            })
        }
        PropertyType::List(_) => {
            let left = pair.left_dehydrated_property_value_and_sanitize(property, property_type);
            let right = pair.right_dehydrated_property_value_and_sanitize(property, property_type);
            let changes = match options.list_compare {
                ListCompareAlgorithm::Simple => list_changes_by_index(items(&left), items(&right)),
                ListCompareAlgorithm::AsSet => list_changes_as_multiset(items(&left), items(&right)),
            };
            (!changes.is_empty()).then_some(Change::ListChange {
                global_id,
                property: name,
                changes,
            })
        }
        PropertyType::Set(_) => {
            let left = pair.left_dehydrated_property_value_and_sanitize(property, property_type);
            let right = pair.right_dehydrated_property_value_and_sanitize(property, property_type);
            let (left, right) = (items(&left), items(&right));
            let added: Vec<Value> = right.iter().filter(|v| !left.contains(v)).cloned().collect();
            let removed: Vec<Value> = left.iter().filter(|v| !right.contains(v)).cloned().collect();
            (!added.is_empty() || !removed.is_empty()).then_some(Change::SetChange {
                global_id,
                property: name,
                added,
                removed,
            })
        }
        PropertyType::Map(_) => {
            let left = pair.left_dehydrated_property_value_and_sanitize(property, property_type);
            let right = pair.right_dehydrated_property_value_and_sanitize(property, property_type);
            let changes = map_changes(entries(&left), entries(&right));
            (!changes.is_empty()).then_some(Change::MapChange {
                global_id,
                property: name,
                changes,
            })
        }
        // unwrapped above
        PropertyType::Optional(_) => None,
    }
}

fn unwrap_optional<'t, 'r>(property_type: &'t PropertyType<'r>) -> &'t PropertyType<'r> {
    match property_type {
        PropertyType::Optional(inner) => unwrap_optional(inner),
        other => other,
    }
}

fn items(value: &Value) -> &[Value] {
    value.as_list().unwrap_or_default()
}

fn entries(value: &Value) -> BTreeMap<&str, &Value> {
    value
        .as_map()
        .map(|m| m.iter().map(|(k, v)| (k.as_str(), v)).collect())
        .unwrap_or_default()
}

fn list_changes_by_index(left: &[Value], right: &[Value]) -> Vec<ElementChange> {
    let mut changes = Vec::new();
    for index in 0..left.len().max(right.len()) {
        match (left.get(index), right.get(index)) {
            (Some(l), Some(r)) if l != r => changes.push(ElementChange::ElementValueChange {
                index,
                left: l.clone(),
                right: r.clone(),
            }),
            (None, Some(r)) => changes.push(ElementChange::ValueAdded {
                index: Some(index),
                value: r.clone(),
            }),
            (Some(l), None) => changes.push(ElementChange::ValueRemoved {
                index: Some(index),
                value: l.clone(),
            }),
            _ => {}
        }
    }
    changes
}

/// Multiset delta: additions in right order, then removals in left order
fn list_changes_as_multiset(left: &[Value], right: &[Value]) -> Vec<ElementChange> {
    let mut unmatched_left: Vec<Option<&Value>> = left.iter().map(Some).collect();
    let mut added = Vec::new();

    for value in right {
        let hit = unmatched_left
            .iter_mut()
            .find(|slot| slot.map(|l| l == value).unwrap_or(false));
        match hit {
            Some(slot) => *slot = None,
            None => added.push(ElementChange::ValueAdded {
                index: None,
                value: value.clone(),
            }),
        }
    }

    let removed = unmatched_left
        .into_iter()
        .flatten()
        .map(|value| ElementChange::ValueRemoved {
            index: None,
            value: value.clone(),
        });

    added.into_iter().chain(removed).collect()
}

fn map_changes(left: BTreeMap<&str, &Value>, right: BTreeMap<&str, &Value>) -> Vec<EntryChange> {
    let mut keys: Vec<&str> = left.keys().chain(right.keys()).copied().collect();
    keys.sort_unstable();
    keys.dedup();

    let mut changes = Vec::new();
    for key in keys {
        match (left.get(key), right.get(key)) {
            (Some(l), Some(r)) if l != r => changes.push(EntryChange::EntryValueChange {
                key: key.to_string(),
                left: (*l).clone(),
                right: (*r).clone(),
            }),
            (None, Some(r)) => changes.push(EntryChange::EntryAdded {
                key: key.to_string(),
                value: (*r).clone(),
            }),
            (Some(l), None) => changes.push(EntryChange::EntryRemoved {
                key: key.to_string(),
                value: (*l).clone(),
            }),
            _ => {}
        }
    }
    changes
}
