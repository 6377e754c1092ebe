//! Diff computation engine.
//!
//! [`compute_diff`] is the operation boundary: it builds both graphs, pairs
//! them and walks every pair. [`diff_graphs`] does the walk for graphs the
//! caller already built.

use crate::diff::appenders::property_change;
use crate::diff::matcher::match_graphs;
use crate::diff::model::{Change, Diff};
use crate::diff::options::DiffOptions;
use crate::errors::{GdError, Result};
use crate::graph::{build_graph, ObjectGraph};
use crate::metamodel::{Instance, TypeRegistry};
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Diff two snapshots of an object graph
///
/// `left` is `None` when nothing existed before; every right node is then
/// reported as a new object.
///
/// # Errors
///
/// Any graph construction error (`UnknownType`, `TypeMismatch`, `NullId`,
/// `UnsupportedIdType`, ...), converted into a [`GdError`] carrying this
/// operation and the root type name.
pub fn compute_diff(
    registry: &TypeRegistry,
    left: Option<&Instance>,
    right: &Instance,
    options: &DiffOptions,
) -> std::result::Result<Diff, GdError> {
    log_op_start!("compute_diff", type_name = right.type_name());
    let start = Instant::now();

    let result = (|| -> Result<Diff> {
        let left_graph = match left {
            Some(instance) => build_graph(registry, instance)?,
            None => ObjectGraph::empty(registry),
        };
        let right_graph = build_graph(registry, right)?;
        diff_graphs(&left_graph, &right_graph, options)
    })()
    .map_err(|e| {
        GdError::from(e)
            .with_op("compute_diff")
            .with_type_name(right.type_name())
    });

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(diff) => {
            log_op_end!(
                "compute_diff",
                duration_ms = elapsed,
                change_count = diff.changes().len()
            );
        }
        Err(e) => {
            log_op_error!("compute_diff", e.clone(), duration_ms = elapsed);
        }
    }
    result
}

/// Diff two already built graphs
///
/// Changes are emitted per right node in discovery order: `NewObject` for a
/// node with no left counterpart, then its property changes in declaration
/// order. `ObjectRemoved` for left-only nodes comes last.
///
/// # Errors
///
/// `UnknownType` if a property type no longer classifies (graphs built
/// against another registry), `Internal` on an inconsistent pairing.
pub fn diff_graphs(
    left: &ObjectGraph<'_>,
    right: &ObjectGraph<'_>,
    options: &DiffOptions,
) -> Result<Diff> {
    let registry = right.registry();
    let pairing = match_graphs(left, right)?;
    let mut changes = Vec::new();

    for pair in &pairing.pairs {
        if pair.is_fake() {
            changes.push(Change::NewObject {
                global_id: pair.global_id().clone(),
            });
            if !options.initial_changes {
                continue;
            }
        }

        for property in pair.properties() {
            // The id of a new object is its identity, not a change.
            if pair.is_fake() && pair.managed_type().is_id_property(property) {
                continue;
            }
            if pair.is_null_on_both_sides(property) {
                continue;
            }
            let property_type = registry.classify(property.generic_type())?;
            if let Some(change) = property_change(pair, property, &property_type, options) {
                changes.push(change);
            }
        }
    }

    for node in &pairing.removed {
        changes.push(Change::ObjectRemoved {
            global_id: node.global_id().clone(),
        });
    }

    tracing::debug!(
        left_nodes = left.len(),
        right_nodes = right.len(),
        change_count = changes.len(),
        "graphs compared"
    );
    Ok(Diff::new(changes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metamodel::{Property, TypeDescriptor, Value};

    fn registry() -> TypeRegistry {
        TypeRegistry::builder()
            .entity(
                "Person",
                "id",
                vec![
                    Property::new("id", TypeDescriptor::Int),
                    Property::new("name", TypeDescriptor::Text),
                ],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_identical_snapshots_have_no_changes() {
        let registry = registry();
        let person = Instance::new("Person").with("id", 1).with("name", "Ann");
        let diff = compute_diff(&registry, Some(&person), &person, &DiffOptions::default()).unwrap();
        assert!(!diff.has_changes());
    }

    #[test]
    fn test_new_object_without_initial_changes() {
        let registry = registry();
        let person = Instance::new("Person").with("id", 1).with("name", "Ann");
        let options = DiffOptions::default().with_initial_changes(false);
        let diff = compute_diff(&registry, None, &person, &options).unwrap();
        assert_eq!(diff.changes().len(), 1);
        assert_eq!(diff.changes()[0].change_type(), "new_object");
    }

    #[test]
    fn test_value_change() {
        let registry = registry();
        let before = Instance::new("Person").with("id", 1).with("name", "Ann");
        let after = Instance::new("Person").with("id", 1).with("name", "Bob");
        let diff = compute_diff(&registry, Some(&before), &after, &DiffOptions::default()).unwrap();
        match diff.changes() {
            [Change::ValueChange { property, left, right, .. }] => {
                assert_eq!(property, "name");
                assert_eq!(left, &Value::from("Ann"));
                assert_eq!(right, &Value::from("Bob"));
            }
            other => panic!("unexpected changes {:?}", other),
        }
    }

    #[test]
    fn test_error_carries_operation_context() {
        let registry = registry();
        let ghost = Instance::new("Ghost");
        let err = compute_diff(&registry, None, &ghost, &DiffOptions::default()).unwrap_err();
        assert_eq!(err.code(), "ERR_UNKNOWN_TYPE");
        assert_eq!(err.op(), Some("compute_diff"));
        assert_eq!(err.type_name(), Some("Ghost"));
    }
}
