//! Object graph diff engine.
//!
//! Compares two snapshots of a domain object graph and produces an ordered,
//! deterministic list of typed changes.
//!
//! ## Entry point
//!
//! ```ignore
//! use graphdelta_core::diff::{compute_diff, render_human_summary, DiffOptions};
//!
//! let diff = compute_diff(&registry, Some(&before), &after, &DiffOptions::default())?;
//! let summary = render_human_summary(&diff);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical change lists.
//! - **Identity by global id**: nodes are paired by [`GlobalId`](crate::identity::GlobalId),
//!   never by position.
//! - **New objects diff against defaults**: with `initial_changes` set, a new
//!   object's properties are compared with the defaults of their declared types.

mod appenders;
pub mod engine;
pub mod matcher;
pub mod model;
pub mod options;
pub mod pair;
pub mod summary;

pub use engine::{compute_diff, diff_graphs};
pub use matcher::{match_graphs, GraphPairing};
pub use model::{Change, Diff, ElementChange, EntryChange};
pub use options::{DiffOptions, ListCompareAlgorithm};
pub use pair::{FakeNodePair, NodePair, RealNodePair};
pub use summary::render_human_summary;
