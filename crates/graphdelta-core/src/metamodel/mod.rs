//! Metamodel: the schema the diff engine reasons with.
//!
//! Every registered domain type is classified as an entity, a value object or
//! a primitive/value type ([`ManagedType`]). Every declared property carries a
//! [`TypeDescriptor`], which the [`TypeRegistry`] classifies into a
//! [`PropertyType`] at each decision point (dehydration, identity, comparison).
//!
//! The registry is built once through [`TypeRegistryBuilder`] and is read-only
//! afterwards.

pub mod descriptor;
pub mod property;
pub mod registry;
pub mod sanitize;
pub mod types;
pub mod value;

pub use descriptor::{default_value, TypeDescriptor};
pub use property::Property;
pub use registry::{TypeRegistry, TypeRegistryBuilder};
pub use sanitize::sanitize;
pub use types::{EntityType, ManagedType, PrimitiveOrValueType, PropertyType, ValueObjectType};
pub use value::{Instance, Value};
