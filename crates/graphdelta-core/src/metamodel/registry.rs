//! Type registry: the immutable catalogue of managed types.
//!
//! ## Validation
//!
//! [`TypeRegistryBuilder::build`] rejects registries the identity layer could
//! not work with:
//!
//! - duplicate type names or duplicate property names within a type
//! - an entity whose id property is not among its declared properties
//! - a `Named` descriptor that does not resolve to a registered type
//! - an entity-keyed-by-entity id chain that loops back on itself
//!
//! The last check is what lets [`InstanceIdFactory`] recurse through composite
//! ids without a depth guard.

use crate::errors::{GraphDeltaError, Result};
use crate::identity::InstanceIdFactory;
use crate::metamodel::descriptor::TypeDescriptor;
use crate::metamodel::property::Property;
use crate::metamodel::types::{
    EntityType, ManagedType, PrimitiveOrValueType, PropertyType, ValueObjectType,
};
use crate::metamodel::value::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

enum PendingType {
    Entity {
        name: String,
        id_property: String,
        properties: Vec<Property>,
    },
    ValueObject {
        name: String,
        properties: Vec<Property>,
    },
    Value {
        name: String,
        descriptor: TypeDescriptor,
    },
}

impl PendingType {
    fn name(&self) -> &str {
        match self {
            PendingType::Entity { name, .. }
            | PendingType::ValueObject { name, .. }
            | PendingType::Value { name, .. } => name,
        }
    }
}

/// Collects type declarations and validates them into a [`TypeRegistry`]
#[derive(Default)]
pub struct TypeRegistryBuilder {
    pending: Vec<PendingType>,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an entity identified by `id_property`
    pub fn entity(
        mut self,
        name: impl Into<String>,
        id_property: impl Into<String>,
        properties: Vec<Property>,
    ) -> Self {
        self.pending.push(PendingType::Entity {
            name: name.into(),
            id_property: id_property.into(),
            properties,
        });
        self
    }

    /// Declare a value object
    pub fn value_object(mut self, name: impl Into<String>, properties: Vec<Property>) -> Self {
        self.pending.push(PendingType::ValueObject {
            name: name.into(),
            properties,
        });
        self
    }

    /// Declare a custom value type represented as `descriptor` (e.g. `Money` as `Float`)
    pub fn value_type(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.pending.push(PendingType::Value {
            name: name.into(),
            descriptor,
        });
        self
    }

    /// Validate all declarations and freeze the registry
    ///
    /// # Errors
    ///
    /// - `DuplicateType`, `DuplicateProperty`
    /// - `MissingIdProperty`
    /// - `UnknownType` for an unresolved `Named` descriptor
    /// - `IdCycle` for a cyclic entity id chain
    pub fn build(self) -> Result<TypeRegistry> {
        let mut types: BTreeMap<String, ManagedType> = BTreeMap::new();

        for pending in self.pending {
            if types.contains_key(pending.name()) {
                return Err(GraphDeltaError::DuplicateType {
                    type_name: pending.name().to_string(),
                });
            }
            let managed = match pending {
                PendingType::Entity {
                    name,
                    id_property,
                    properties,
                } => {
                    check_unique_properties(&name, &properties)?;
                    ManagedType::Entity(EntityType::new(name, &id_property, properties)?)
                }
                PendingType::ValueObject { name, properties } => {
                    check_unique_properties(&name, &properties)?;
                    ManagedType::ValueObject(ValueObjectType::new(name, properties))
                }
                PendingType::Value { name, descriptor } => {
                    ManagedType::PrimitiveOrValue(PrimitiveOrValueType::new(name, descriptor))
                }
            };
            types.insert(managed.name().to_string(), managed);
        }

        let registry = TypeRegistry { types };
        registry.check_references()?;
        registry.check_id_chains()?;

        tracing::debug!(types = registry.types.len(), "type registry built");
        Ok(registry)
    }
}

fn check_unique_properties(type_name: &str, properties: &[Property]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for property in properties {
        if !seen.insert(property.name()) {
            return Err(GraphDeltaError::DuplicateProperty {
                type_name: type_name.to_string(),
                property: property.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Immutable catalogue of managed types
///
/// Read-only after [`TypeRegistryBuilder::build`]; safe to share across
/// threads for independent diff computations.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: BTreeMap<String, ManagedType>,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// # Errors
    ///
    /// `UnknownType` if no type of that name is registered.
    pub fn managed_type(&self, name: &str) -> Result<&ManagedType> {
        self.types
            .get(name)
            .ok_or_else(|| GraphDeltaError::UnknownType {
                type_name: name.to_string(),
            })
    }

    /// # Errors
    ///
    /// `UnknownType` if the name is not a registered entity.
    pub fn entity(&self, name: &str) -> Result<&EntityType> {
        match self.managed_type(name)? {
            ManagedType::Entity(entity) => Ok(entity),
            _ => Err(GraphDeltaError::UnknownType {
                type_name: name.to_string(),
            }),
        }
    }

    /// # Errors
    ///
    /// `UnknownType` if the name is not a registered value object.
    pub fn value_object(&self, name: &str) -> Result<&ValueObjectType> {
        match self.managed_type(name)? {
            ManagedType::ValueObject(vo) => Ok(vo),
            _ => Err(GraphDeltaError::UnknownType {
                type_name: name.to_string(),
            }),
        }
    }

    pub fn types(&self) -> impl Iterator<Item = &ManagedType> {
        self.types.values()
    }

    /// Classify a declared type
    ///
    /// # Errors
    ///
    /// `UnknownType` if a `Named` descriptor is not registered.
    pub fn classify(&self, descriptor: &TypeDescriptor) -> Result<PropertyType<'_>> {
        let classified = match descriptor {
            TypeDescriptor::Named(name) => match self.managed_type(name)? {
                ManagedType::Entity(e) => PropertyType::Entity(e),
                ManagedType::ValueObject(v) => PropertyType::ValueObject(v),
                ManagedType::PrimitiveOrValue(p) => PropertyType::PrimitiveOrValue(Cow::Borrowed(p)),
            },
            TypeDescriptor::Optional(inner) => PropertyType::Optional(Box::new(self.classify(inner)?)),
            TypeDescriptor::List(inner) => PropertyType::List(Box::new(self.classify(inner)?)),
            TypeDescriptor::Set(inner) => PropertyType::Set(Box::new(self.classify(inner)?)),
            TypeDescriptor::Map(inner) => PropertyType::Map(Box::new(self.classify(inner)?)),
            scalar => PropertyType::PrimitiveOrValue(Cow::Owned(PrimitiveOrValueType::builtin(
                scalar.clone(),
            ))),
        };
        Ok(classified)
    }

    /// Id factory for an entity of this registry
    pub fn id_factory<'r>(&'r self, entity: &'r EntityType) -> InstanceIdFactory<'r> {
        InstanceIdFactory::new(self, entity)
    }

    /// Id factory for the entity named `name`
    ///
    /// # Errors
    ///
    /// `UnknownType` if the name is not a registered entity.
    pub fn id_factory_for(&self, name: &str) -> Result<InstanceIdFactory<'_>> {
        Ok(InstanceIdFactory::new(self, self.entity(name)?))
    }

    /// Canonical string form of a value object
    ///
    /// Declared properties in declaration order, each rendered per its own
    /// classification, joined with `,`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if `value` is not an instance of `vo`; otherwise any
    /// error from rendering nested entity ids.
    pub fn value_object_to_string(&self, vo: &ValueObjectType, value: &Value) -> Result<String> {
        let instance = match value {
            Value::Object(instance) if instance.type_name() == vo.name() => instance,
            other => {
                return Err(GraphDeltaError::TypeMismatch {
                    type_name: vo.name().to_string(),
                    property: String::new(),
                    expected: vo.name().to_string(),
                    found: match other {
                        Value::Object(i) => i.type_name().to_string(),
                        v => v.kind_name().to_string(),
                    },
                })
            }
        };

        let mut parts = Vec::with_capacity(vo.properties().len());
        for property in vo.properties() {
            let property_type = self.classify(property.generic_type())?;
            parts.push(self.string_of(&property_type, instance.get(property.name()))?);
        }
        Ok(parts.join(","))
    }

    /// Canonical string of any value under its classification
    ///
    /// # Errors
    ///
    /// As [`TypeRegistry::value_object_to_string`] and
    /// [`InstanceIdFactory::create`].
    pub fn string_of(&self, property_type: &PropertyType<'_>, value: &Value) -> Result<String> {
        if value.is_null() {
            return Ok(String::new());
        }
        match property_type {
            PropertyType::PrimitiveOrValue(p) => Ok(p.smart_to_string(value)),
            PropertyType::ValueObject(vo) => self.value_object_to_string(vo, value),
            // A live object and a reference to it render the same local id.
            PropertyType::Entity(entity) => match value {
                Value::Ref(id) => match id.as_instance_id() {
                    Some(instance_id) if instance_id.type_name() == entity.name() => {
                        Ok(instance_id.local_id_string().to_string())
                    }
                    _ => Err(GraphDeltaError::TypeMismatch {
                        type_name: entity.name().to_string(),
                        property: String::new(),
                        expected: entity.name().to_string(),
                        found: id.value(),
                    }),
                },
                other => {
                    let id = self.id_factory(entity).create(entity.id_of(other)?)?;
                    Ok(id.local_id_string().to_string())
                }
            },
            PropertyType::Optional(inner) => self.string_of(inner, value),
            PropertyType::List(inner) | PropertyType::Set(inner) => {
                let items = value
                    .as_list()
                    .ok_or_else(|| shape_mismatch(property_type, value))?;
                let rendered = items
                    .iter()
                    .map(|item| self.string_of(inner, item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("[{}]", rendered.join(",")))
            }
            PropertyType::Map(inner) => {
                let entries = value
                    .as_map()
                    .ok_or_else(|| shape_mismatch(property_type, value))?;
                let mut rendered = Vec::with_capacity(entries.len());
                for (key, item) in entries {
                    rendered.push(format!("{}={}", key, self.string_of(inner, item)?));
                }
                Ok(format!("{{{}}}", rendered.join(",")))
            }
        }
    }

    fn check_references(&self) -> Result<()> {
        for managed in self.types.values() {
            let descriptors: Vec<&TypeDescriptor> = match managed {
                ManagedType::PrimitiveOrValue(p) => vec![p.descriptor()],
                other => other.properties().iter().map(|p| p.generic_type()).collect(),
            };
            for descriptor in descriptors {
                for name in descriptor.named_types() {
                    if !self.types.contains_key(name) {
                        return Err(GraphDeltaError::UnknownType {
                            type_name: name.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_id_chains(&self) -> Result<()> {
        for managed in self.types.values() {
            let ManagedType::Entity(start) = managed else {
                continue;
            };
            let mut seen = BTreeSet::new();
            let mut current = start;
            while let TypeDescriptor::Named(next) = current.id_property_generic_type() {
                if !seen.insert(current.name()) {
                    return Err(GraphDeltaError::IdCycle {
                        type_name: start.name().to_string(),
                    });
                }
                match self.types.get(next) {
                    Some(ManagedType::Entity(next_entity)) => current = next_entity,
                    _ => break,
                }
            }
        }
        Ok(())
    }
}

fn shape_mismatch(property_type: &PropertyType<'_>, found: &Value) -> GraphDeltaError {
    GraphDeltaError::TypeMismatch {
        type_name: property_type.name(),
        property: String::new(),
        expected: property_type.name(),
        found: found.kind_name().to_string(),
    }
}
