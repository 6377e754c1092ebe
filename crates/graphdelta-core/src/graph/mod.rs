//! Object graphs: every node reachable from a root instance.
//!
//! A graph is built per diff side from the read-only [`Instance`] view and
//! dropped after the comparison. Nodes are stored in discovery order (depth
//! first, pre-order) and indexed by [`GlobalId`]; a referenced entity that is
//! reachable along several paths, or along a cycle, becomes a single node.
//!
//! [`Instance`]: crate::metamodel::Instance
//! [`GlobalId`]: crate::identity::GlobalId

pub mod builder;
pub mod node;

pub use builder::{build_graph, ObjectGraph};
pub use node::ObjectNode;
