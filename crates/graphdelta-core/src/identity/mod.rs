//! Global identity of object nodes.
//!
//! Every node of an object graph is identified by a [`GlobalId`] derived from
//! the metamodel, never from memory addresses:
//!
//! - entities by type name + dehydrated local id ([`InstanceId`]), produced by
//!   the per-entity [`InstanceIdFactory`]
//! - embedded value objects by owner id + property path ([`ValueObjectIdWithOwner`])
//! - a value object used as graph root by its type name ([`UnboundedValueObjectId`])

pub mod factory;
pub mod global_id;

pub use factory::InstanceIdFactory;
pub use global_id::{GlobalId, InstanceId, UnboundedValueObjectId, ValueObjectIdWithOwner};
