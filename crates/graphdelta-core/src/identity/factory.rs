//! Per-entity derivation of [`InstanceId`]s.
//!
//! The id property of an entity is classified into exactly one of three kinds,
//! and every operation here matches that closed set:
//!
//! | id kind           | dehydrated local id                 | string form                |
//! |-------------------|-------------------------------------|----------------------------|
//! | entity            | the nested entity's dehydrated id   | nested factory's string    |
//! | value object      | canonical string (`Value::Text`)    | the text itself            |
//! | primitive / value | the value unchanged                 | `smart_to_string`          |
//!
//! Any other classification (list, set, map, optional) is rejected with
//! `UnsupportedIdType`. Entity-keyed-by-entity chains recurse; the registry
//! guarantees they are acyclic.

use crate::errors::{GraphDeltaError, Result};
use crate::identity::global_id::{GlobalId, InstanceId};
use crate::metamodel::{
    EntityType, PrimitiveOrValueType, PropertyType, TypeDescriptor, TypeRegistry, Value,
    ValueObjectType,
};
use std::borrow::Cow;

/// Closed set of supported id-property classifications
enum IdKind<'r> {
    Entity(&'r EntityType),
    ValueObject(&'r ValueObjectType),
    PrimitiveOrValue(Cow<'r, PrimitiveOrValueType>),
}

/// Derives canonical ids for one entity type
#[derive(Debug, Clone, Copy)]
pub struct InstanceIdFactory<'r> {
    registry: &'r TypeRegistry,
    entity_type: &'r EntityType,
}

impl<'r> InstanceIdFactory<'r> {
    pub fn new(registry: &'r TypeRegistry, entity_type: &'r EntityType) -> Self {
        Self {
            registry,
            entity_type,
        }
    }

    pub fn entity_type(&self) -> &'r EntityType {
        self.entity_type
    }

    /// Id for a live local id value
    ///
    /// # Errors
    ///
    /// - `NullArgument` if `local_id` is null
    /// - `UnsupportedIdType` if the id property is not entity, value object
    ///   or primitive/value typed
    /// - `NullId` / `TypeMismatch` if a nested entity id cannot be read
    pub fn create(&self, local_id: &Value) -> Result<InstanceId> {
        if local_id.is_null() {
            return Err(GraphDeltaError::NullArgument {
                op: "InstanceIdFactory::create".to_string(),
                argument: "local_id".to_string(),
            });
        }

        let dehydrated = self.dehydrated_local_id(local_id)?;
        let local_id_string = self.local_id_as_string(&dehydrated)?;

        Ok(InstanceId::new(
            self.entity_type.name(),
            dehydrated,
            local_id_string,
        ))
    }

    /// Id for a local id that is already dehydrated (e.g. read from storage)
    ///
    /// # Errors
    ///
    /// - `NullArgument` if `dehydrated_local_id` is null
    /// - `UnsupportedIdType` as for [`InstanceIdFactory::create`]
    pub fn create_from_dehydrated_local_id(&self, dehydrated_local_id: &Value) -> Result<InstanceId> {
        if dehydrated_local_id.is_null() {
            return Err(GraphDeltaError::NullArgument {
                op: "InstanceIdFactory::create_from_dehydrated_local_id".to_string(),
                argument: "dehydrated_local_id".to_string(),
            });
        }

        let local_id_string = self.local_id_as_string(dehydrated_local_id)?;

        Ok(InstanceId::new(
            self.entity_type.name(),
            dehydrated_local_id.clone(),
            local_id_string,
        ))
    }

    /// String form of a dehydrated local id
    ///
    /// # Errors
    ///
    /// `UnsupportedIdType` if the id property kind is not supported.
    pub fn local_id_as_string(&self, dehydrated_local_id: &Value) -> Result<String> {
        match self.id_kind()? {
            IdKind::Entity(id_entity) => self
                .registry
                .id_factory(id_entity)
                .local_id_as_string(dehydrated_local_id),
            IdKind::ValueObject(_) => Ok(dehydrated_local_id.to_string()),
            IdKind::PrimitiveOrValue(primitive) => Ok(primitive.smart_to_string(dehydrated_local_id)),
        }
    }

    /// Declared type of the dehydrated local id
    ///
    /// # Errors
    ///
    /// `UnsupportedIdType` if the id property kind is not supported.
    pub fn local_id_dehydrated_type(&self) -> Result<TypeDescriptor> {
        match self.id_kind()? {
            IdKind::Entity(id_entity) => self
                .registry
                .id_factory(id_entity)
                .local_id_dehydrated_type(),
            IdKind::ValueObject(_) => Ok(TypeDescriptor::Text),
            IdKind::PrimitiveOrValue(_) => Ok(self.entity_type.id_property_generic_type().clone()),
        }
    }

    fn dehydrated_local_id(&self, local_id: &Value) -> Result<Value> {
        match self.id_kind()? {
            IdKind::Entity(id_entity) => match local_id {
                Value::Ref(GlobalId::Instance(nested)) if nested.type_name() == id_entity.name() => {
                    Ok(nested.local_id().clone())
                }
                Value::Ref(other) => Err(GraphDeltaError::TypeMismatch {
                    type_name: self.entity_type.name().to_string(),
                    property: self.entity_type.id_property().name().to_string(),
                    expected: id_entity.name().to_string(),
                    found: other.value(),
                }),
                _ => {
                    let nested_id = id_entity.id_of(local_id)?;
                    self.registry
                        .id_factory(id_entity)
                        .dehydrated_local_id(nested_id)
                }
            },
            IdKind::ValueObject(vo) => Ok(Value::Text(
                self.registry.value_object_to_string(vo, local_id)?,
            )),
            IdKind::PrimitiveOrValue(_) => Ok(local_id.clone()),
        }
    }

    fn id_kind(&self) -> Result<IdKind<'r>> {
        let registry: &'r TypeRegistry = self.registry;
        match registry.classify(self.entity_type.id_property_generic_type())? {
            PropertyType::Entity(e) => Ok(IdKind::Entity(e)),
            PropertyType::ValueObject(v) => Ok(IdKind::ValueObject(v)),
            PropertyType::PrimitiveOrValue(p) => Ok(IdKind::PrimitiveOrValue(p)),
            unsupported @ (PropertyType::List(_)
            | PropertyType::Set(_)
            | PropertyType::Map(_)
            | PropertyType::Optional(_)) => Err(GraphDeltaError::UnsupportedIdType {
                id_type: unsupported.name(),
                owner: self.entity_type.name().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metamodel::{Instance, Property};

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
            .entity(
                "Badge",
                "holder",
                vec![Property::new("holder", TypeDescriptor::named("Person"))],
            )
            .entity(
                "Team",
                "members",
                vec![Property::new(
                    "members",
                    TypeDescriptor::list(TypeDescriptor::Int),
                )],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_primitive_id() {
        let registry = registry();
        let factory = registry.id_factory_for("Person").unwrap();
        let id = factory.create(&Value::Int(5)).unwrap();
        assert_eq!(id.value(), "Person/5");
        assert_eq!(id.local_id(), &Value::Int(5));
        assert_eq!(factory.local_id_dehydrated_type().unwrap(), TypeDescriptor::Int);
    }

    #[test]
    fn test_entity_keyed_by_entity() {
        let registry = registry();
        let factory = registry.id_factory_for("Badge").unwrap();
        let holder = Value::Object(Instance::new("Person").with("id", 7));
        let id = factory.create(&holder).unwrap();
        assert_eq!(id.local_id(), &Value::Int(7));
        assert_eq!(id.value(), "Badge/7");
        assert_eq!(factory.local_id_dehydrated_type().unwrap(), TypeDescriptor::Int);
    }

    #[test]
    fn test_null_local_id_fails_fast() {
        let registry = registry();
        let factory = registry.id_factory_for("Person").unwrap();
        assert!(matches!(
            factory.create(&Value::Null),
            Err(GraphDeltaError::NullArgument { .. })
        ));
        assert!(matches!(
            factory.create_from_dehydrated_local_id(&Value::Null),
            Err(GraphDeltaError::NullArgument { .. })
        ));
    }

    #[test]
    fn test_collection_id_is_unsupported() {
        let registry = registry();
        let factory = registry.id_factory_for("Team").unwrap();
        let err = factory
            .create(&Value::List(vec![Value::Int(1)]))
            .unwrap_err();
        assert_eq!(
            err,
            GraphDeltaError::UnsupportedIdType {
                id_type: "Vec<i64>".to_string(),
                owner: "Team".to_string(),
            }
        );
        assert!(factory.local_id_dehydrated_type().is_err());
    }
}
