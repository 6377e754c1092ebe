//! GraphDelta Core - object graph snapshot diffing
//!
//! This crate compares two snapshots of a domain object graph and reports what
//! changed, including:
//! - A validated type registry classifying entities, value objects and values
//! - Canonical global ids, with composite entity ids resolved recursively
//! - Object graphs built from a read-only key/value view of domain objects
//! - Real and fake node pairs, the latter standing in for objects with no
//!   previous snapshot
//! - A diff engine emitting typed value, reference and container changes

pub mod diff;
pub mod errors;
pub mod graph;
pub mod identity;
pub mod logging_facility;
pub mod metamodel;

// Re-exported for the logging macros
#[doc(hidden)]
pub use graphdelta_core_types as core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use diff::{compute_diff, diff_graphs, Change, Diff, DiffOptions, NodePair};
pub use errors::{GdError, GdErrorKind, GraphDeltaError, Result};
pub use graph::{build_graph, ObjectGraph, ObjectNode};
pub use identity::{GlobalId, InstanceId, InstanceIdFactory};
pub use metamodel::{Instance, Property, TypeDescriptor, TypeRegistry, Value};
