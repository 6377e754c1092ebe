//! Managed types and property classification.

use crate::errors::{GraphDeltaError, Result};
use crate::metamodel::descriptor::TypeDescriptor;
use crate::metamodel::property::Property;
use crate::metamodel::value::{Instance, Value};
use chrono::SecondsFormat;
use std::borrow::Cow;

/// Domain type with independent identity, identified by its id property
#[derive(Debug, Clone, PartialEq)]
pub struct EntityType {
    name: String,
    properties: Vec<Property>,
    id_index: usize,
}

impl EntityType {
    /// Create an entity type; the id property must be one of `properties`.
    ///
    /// # Errors
    ///
    /// `MissingIdProperty` when no property is named `id_property`.
    pub(crate) fn new(
        name: String,
        id_property: &str,
        properties: Vec<Property>,
    ) -> Result<Self> {
        let id_index = properties
            .iter()
            .position(|p| p.name() == id_property)
            .ok_or_else(|| GraphDeltaError::MissingIdProperty {
                type_name: name.clone(),
                property: id_property.to_string(),
            })?;
        Ok(Self {
            name,
            properties,
            id_index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn id_property(&self) -> &Property {
        &self.properties[self.id_index]
    }

    pub fn id_property_generic_type(&self) -> &TypeDescriptor {
        self.id_property().generic_type()
    }

    /// Raw id of an instance of this entity
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` if `instance` is of another type
    /// - `NullId` if the id property is null
    pub fn id_of_instance<'v>(&self, instance: &'v Instance) -> Result<&'v Value> {
        if instance.type_name() != self.name {
            return Err(GraphDeltaError::TypeMismatch {
                type_name: self.name.clone(),
                property: self.id_property().name().to_string(),
                expected: self.name.clone(),
                found: instance.type_name().to_string(),
            });
        }
        let id = instance.get(self.id_property().name());
        if id.is_null() {
            return Err(GraphDeltaError::NullId {
                type_name: self.name.clone(),
            });
        }
        Ok(id)
    }

    /// Raw id of a value expected to hold an instance of this entity
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if `value` is not an object, otherwise as
    /// [`EntityType::id_of_instance`].
    pub fn id_of<'v>(&self, value: &'v Value) -> Result<&'v Value> {
        match value {
            Value::Object(instance) => self.id_of_instance(instance),
            other => Err(GraphDeltaError::TypeMismatch {
                type_name: self.name.clone(),
                property: self.id_property().name().to_string(),
                expected: self.name.clone(),
                found: other.kind_name().to_string(),
            }),
        }
    }
}

/// Domain type without independent identity
#[derive(Debug, Clone, PartialEq)]
pub struct ValueObjectType {
    name: String,
    properties: Vec<Property>,
}

impl ValueObjectType {
    pub(crate) fn new(name: String, properties: Vec<Property>) -> Self {
        Self { name, properties }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}

/// Scalar type, compared and stringified directly
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveOrValueType {
    name: String,
    descriptor: TypeDescriptor,
}

impl PrimitiveOrValueType {
    pub(crate) fn new(name: String, descriptor: TypeDescriptor) -> Self {
        Self { name, descriptor }
    }

    /// Classification of a built-in scalar descriptor
    pub fn builtin(descriptor: TypeDescriptor) -> Self {
        Self {
            name: descriptor.to_string(),
            descriptor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying representation of the value type
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Type-aware string form, identical for semantically equal values
    ///
    /// Floats never use exponent notation and `-0` renders as `0`; uuids are
    /// lowercase hyphenated; timestamps are RFC 3339 UTC with `Z`; null is the
    /// empty string.
    pub fn smart_to_string(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(x) if *x == 0.0 => "0".to_string(),
            Value::Float(x) => x.to_string(),
            Value::Text(s) => s.clone(),
            Value::Uuid(u) => u.hyphenated().to_string(),
            Value::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::List(items) => items
                .iter()
                .map(|item| self.smart_to_string(item))
                .collect::<Vec<_>>()
                .join(","),
            Value::Ref(id) => id.value(),
            Value::Map(_) | Value::Object(_) => value.to_string(),
        }
    }
}

/// A registered domain type
#[derive(Debug, Clone, PartialEq)]
pub enum ManagedType {
    Entity(EntityType),
    ValueObject(ValueObjectType),
    PrimitiveOrValue(PrimitiveOrValueType),
}

impl ManagedType {
    pub fn name(&self) -> &str {
        match self {
            ManagedType::Entity(e) => e.name(),
            ManagedType::ValueObject(v) => v.name(),
            ManagedType::PrimitiveOrValue(p) => p.name(),
        }
    }

    /// Declared properties in declaration order; empty for value types
    pub fn properties(&self) -> &[Property] {
        match self {
            ManagedType::Entity(e) => e.properties(),
            ManagedType::ValueObject(v) => v.properties(),
            ManagedType::PrimitiveOrValue(_) => &[],
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties().iter().find(|p| p.name() == name)
    }

    pub fn as_entity(&self) -> Option<&EntityType> {
        match self {
            ManagedType::Entity(e) => Some(e),
            _ => None,
        }
    }

    /// True if `property` is this entity's id property
    pub fn is_id_property(&self, property: &Property) -> bool {
        self.as_entity()
            .map(|e| e.id_property().name() == property.name())
            .unwrap_or(false)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ManagedType::Entity(_) => "entity",
            ManagedType::ValueObject(_) => "value object",
            ManagedType::PrimitiveOrValue(_) => "primitive or value",
        }
    }
}

/// Classification of a property's declared type
///
/// Produced by [`TypeRegistry::classify`](crate::metamodel::TypeRegistry::classify).
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyType<'r> {
    Entity(&'r EntityType),
    ValueObject(&'r ValueObjectType),
    PrimitiveOrValue(Cow<'r, PrimitiveOrValueType>),
    List(Box<PropertyType<'r>>),
    Set(Box<PropertyType<'r>>),
    Map(Box<PropertyType<'r>>),
    Optional(Box<PropertyType<'r>>),
}

impl PropertyType<'_> {
    /// Rendered type name, for diagnostics
    pub fn name(&self) -> String {
        match self {
            PropertyType::Entity(e) => e.name().to_string(),
            PropertyType::ValueObject(v) => v.name().to_string(),
            PropertyType::PrimitiveOrValue(p) => p.name().to_string(),
            PropertyType::List(inner) => format!("Vec<{}>", inner.name()),
            PropertyType::Set(inner) => format!("Set<{}>", inner.name()),
            PropertyType::Map(inner) => format!("Map<String, {}>", inner.name()),
            PropertyType::Optional(inner) => format!("Option<{}>", inner.name()),
        }
    }

    /// True for entity and value-object classifications
    pub fn is_managed_class(&self) -> bool {
        matches!(self, PropertyType::Entity(_) | PropertyType::ValueObject(_))
    }
}
