//! Builds an [`ObjectGraph`] by walking a root instance.

use crate::errors::{GraphDeltaError, Result};
use crate::graph::node::ObjectNode;
use crate::identity::{GlobalId, UnboundedValueObjectId, ValueObjectIdWithOwner};
use crate::metamodel::{Instance, ManagedType, PropertyType, TypeRegistry, Value};
use std::collections::{BTreeMap, HashMap};

/// All nodes reachable from one root instance
#[derive(Debug, Clone)]
pub struct ObjectGraph<'r> {
    registry: &'r TypeRegistry,
    nodes: Vec<ObjectNode<'r>>,
    index: HashMap<GlobalId, usize>,
}

impl<'r> ObjectGraph<'r> {
    /// Graph with no nodes, the left side of a diff against nothing
    pub fn empty(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    pub fn root(&self) -> Option<&ObjectNode<'r>> {
        self.nodes.first()
    }

    /// Nodes in discovery order
    pub fn nodes(&self) -> &[ObjectNode<'r>] {
        &self.nodes
    }

    pub fn get(&self, global_id: &GlobalId) -> Option<&ObjectNode<'r>> {
        self.index.get(global_id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, global_id: &GlobalId) -> bool {
        self.index.contains_key(global_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the graph reachable from `root`
///
/// # Errors
///
/// - `UnknownType` if the root or a nested object is not registered
/// - `TypeMismatch` for a primitive root, or a value whose shape does not
///   match its declared type
/// - `UnknownProperty` if an instance carries an undeclared property
/// - `NullId` for an entity without id
/// - `UnsupportedIdType` from id derivation
pub fn build_graph<'r>(registry: &'r TypeRegistry, root: &Instance) -> Result<ObjectGraph<'r>> {
    let managed = registry.managed_type(root.type_name())?;
    let root_id: GlobalId = match managed {
        ManagedType::Entity(entity) => registry
            .id_factory(entity)
            .create(entity.id_of_instance(root)?)?
            .into(),
        ManagedType::ValueObject(vo) => UnboundedValueObjectId::new(vo.name()).into(),
        ManagedType::PrimitiveOrValue(p) => {
            return Err(GraphDeltaError::TypeMismatch {
                type_name: p.name().to_string(),
                property: String::new(),
                expected: "entity or value object".to_string(),
                found: managed.kind_name().to_string(),
            })
        }
    };

    let mut graph = ObjectGraph::empty(registry);
    graph.visit(root_id, managed, root)?;

    tracing::debug!(
        global_id = %graph.nodes[0].global_id(),
        nodes = graph.nodes.len(),
        "object graph built"
    );
    Ok(graph)
}

impl<'r> ObjectGraph<'r> {
    fn visit(&mut self, global_id: GlobalId, managed: &'r ManagedType, instance: &Instance) -> Result<()> {
        if self.index.contains_key(&global_id) {
            return Ok(());
        }

        for key in instance.values().keys() {
            if managed.property(key).is_none() {
                return Err(GraphDeltaError::UnknownProperty {
                    type_name: managed.name().to_string(),
                    property: key.clone(),
                });
            }
        }

        // Registered before descending so cycles terminate on the index check.
        let slot = self.nodes.len();
        self.index.insert(global_id.clone(), slot);
        self.nodes
            .push(ObjectNode::new(global_id.clone(), managed, instance.clone()));

        let registry = self.registry;
        let mut dehydrated = BTreeMap::new();
        for property in managed.properties() {
            let property_type = registry.classify(property.generic_type())?;
            let value = self.dehydrate(
                &global_id,
                property.name(),
                instance.get(property.name()),
                &property_type,
            )?;
            dehydrated.insert(property.name().to_string(), value);
        }
        self.nodes[slot].set_dehydrated(dehydrated);
        Ok(())
    }

    fn dehydrate(
        &mut self,
        owner: &GlobalId,
        fragment: &str,
        value: &Value,
        property_type: &PropertyType<'r>,
    ) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        let registry = self.registry;

        match property_type {
            PropertyType::PrimitiveOrValue(_) => Ok(value.clone()),
            PropertyType::Optional(inner) => self.dehydrate(owner, fragment, value, inner),
            PropertyType::Entity(entity) => {
                // Already a reference: points outside this snapshot.
                if let Value::Ref(id) = value {
                    return Ok(Value::Ref(id.clone()));
                }
                let id: GlobalId = registry
                    .id_factory(entity)
                    .create(entity.id_of(value)?)?
                    .into();
                let managed = registry.managed_type(entity.name())?;
                if let Value::Object(instance) = value {
                    self.visit(id.clone(), managed, instance)?;
                }
                Ok(Value::Ref(id))
            }
            PropertyType::ValueObject(vo) => {
                let instance = match value {
                    Value::Object(instance) if instance.type_name() == vo.name() => instance,
                    other => return Err(mismatch(owner, fragment, vo.name(), other)),
                };
                let id = owned_value_object_id(owner, vo.name(), fragment);
                let managed = registry.managed_type(vo.name())?;
                self.visit(id.clone(), managed, instance)?;
                Ok(Value::Ref(id))
            }
            PropertyType::List(inner) | PropertyType::Set(inner) => {
                let items = value
                    .as_list()
                    .ok_or_else(|| mismatch(owner, fragment, &property_type.name(), value))?;
                let is_set = matches!(property_type, PropertyType::Set(_));
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let element_fragment = if is_set {
                        format!("{}/{}", fragment, registry.string_of(inner, item)?)
                    } else {
                        format!("{}/{}", fragment, i)
                    };
                    out.push(self.dehydrate(owner, &element_fragment, item, inner)?);
                }
                Ok(Value::List(out))
            }
            PropertyType::Map(inner) => {
                let entries = value
                    .as_map()
                    .ok_or_else(|| mismatch(owner, fragment, &property_type.name(), value))?;
                let mut out = BTreeMap::new();
                for (key, item) in entries {
                    let entry_fragment = format!("{}/{}", fragment, key);
                    out.insert(key.clone(), self.dehydrate(owner, &entry_fragment, item, inner)?);
                }
                Ok(Value::Map(out))
            }
        }
    }
}

/// Id of a value object embedded at `fragment` of `owner`
///
/// Nested value objects share the outermost owner and extend its fragment
/// path, so `Person/1#address/geo` rather than a chain of owners.
fn owned_value_object_id(owner: &GlobalId, type_name: &str, fragment: &str) -> GlobalId {
    match owner {
        GlobalId::ValueObject(parent) => ValueObjectIdWithOwner::new(
            type_name,
            parent.owner_id().clone(),
            format!("{}/{}", parent.fragment(), fragment),
        )
        .into(),
        _ => ValueObjectIdWithOwner::new(type_name, owner.clone(), fragment).into(),
    }
}

fn mismatch(owner: &GlobalId, fragment: &str, expected: &str, found: &Value) -> GraphDeltaError {
    GraphDeltaError::TypeMismatch {
        type_name: owner.type_name().to_string(),
        property: fragment.to_string(),
        expected: expected.to_string(),
        found: match found {
            Value::Object(instance) => instance.type_name().to_string(),
            other => other.kind_name().to_string(),
        },
    }
}
