//! One snapshot of a domain object inside an [`ObjectGraph`](super::ObjectGraph).

use crate::identity::GlobalId;
use crate::metamodel::value::NULL;
use crate::metamodel::{Instance, ManagedType, Property, Value};
use std::collections::BTreeMap;

/// A node of an object graph
///
/// Holds the raw property values as captured from the instance plus their
/// dehydrated form, where every nested entity or value object has been
/// replaced by `Value::Ref` to the node that represents it.
#[derive(Debug, Clone)]
pub struct ObjectNode<'r> {
    global_id: GlobalId,
    managed_type: &'r ManagedType,
    cdo: Instance,
    dehydrated: BTreeMap<String, Value>,
}

impl<'r> ObjectNode<'r> {
    pub(crate) fn new(global_id: GlobalId, managed_type: &'r ManagedType, cdo: Instance) -> Self {
        Self {
            global_id,
            managed_type,
            cdo,
            dehydrated: BTreeMap::new(),
        }
    }

    pub(crate) fn set_dehydrated(&mut self, dehydrated: BTreeMap<String, Value>) {
        self.dehydrated = dehydrated;
    }

    pub fn global_id(&self) -> &GlobalId {
        &self.global_id
    }

    pub fn managed_type(&self) -> &'r ManagedType {
        self.managed_type
    }

    /// Declared properties of the node's type, in declaration order
    pub fn properties(&self) -> &'r [Property] {
        self.managed_type.properties()
    }

    /// The captured instance this node was built from
    pub fn cdo(&self) -> &Instance {
        &self.cdo
    }

    /// Raw value of a property, `Null` when absent
    pub fn property_value(&self, property: &Property) -> &Value {
        self.cdo.get(property.name())
    }

    /// Value with nested objects replaced by references
    pub fn dehydrated_property_value(&self, property: &Property) -> &Value {
        self.dehydrated.get(property.name()).unwrap_or(&NULL)
    }

    /// Id of the single node referenced by `property`, if any
    pub fn reference(&self, property: &Property) -> Option<&GlobalId> {
        self.dehydrated_property_value(property).as_global_id()
    }

    /// Ids of all nodes referenced by `property`
    ///
    /// Covers single references as well as list, set and map elements, in
    /// element order (key order for maps).
    pub fn references(&self, property: &Property) -> Vec<GlobalId> {
        let mut out = Vec::new();
        collect_refs(self.dehydrated_property_value(property), &mut out);
        out
    }
}

fn collect_refs(value: &Value, out: &mut Vec<GlobalId>) {
    match value {
        Value::Ref(id) => out.push(id.clone()),
        Value::List(items) => items.iter().for_each(|item| collect_refs(item, out)),
        Value::Map(entries) => entries.values().for_each(|item| collect_refs(item, out)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::UnboundedValueObjectId;
    use crate::metamodel::{TypeDescriptor, TypeRegistry};

    #[test]
    fn test_references_flatten_containers() {
        let registry = TypeRegistry::builder()
            .value_object(
                "Box",
                vec![Property::new(
                    "items",
                    TypeDescriptor::list(TypeDescriptor::Int),
                )],
            )
            .build()
            .unwrap();
        let managed = registry.managed_type("Box").unwrap();
        let property = managed.property("items").unwrap().clone();

        let a: GlobalId = UnboundedValueObjectId::new("A").into();
        let b: GlobalId = UnboundedValueObjectId::new("B").into();
        let mut node = ObjectNode::new(
            UnboundedValueObjectId::new("Box").into(),
            managed,
            Instance::new("Box"),
        );
        let mut dehydrated = BTreeMap::new();
        dehydrated.insert(
            "items".to_string(),
            Value::List(vec![Value::Ref(a.clone()), Value::Int(1), Value::Ref(b.clone())]),
        );
        node.set_dehydrated(dehydrated);

        assert_eq!(node.references(&property), vec![a, b]);
        assert!(node.reference(&property).is_none());
        assert!(node.property_value(&property).is_null());
    }
}
