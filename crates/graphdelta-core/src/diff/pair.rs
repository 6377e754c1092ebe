//! Paired views over corresponding left (old) and right (new) nodes.
//!
//! A [`NodePair`] is either real, when both graphs contain the node, or fake,
//! when the node only exists on the right. The fake variant answers every
//! left-hand question with "nothing was there": defaults of the declared
//! property types, no references. Asking a fake pair for its left node is a
//! contract violation and fails with `NotImplemented`.

use crate::errors::{GraphDeltaError, Result};
use crate::graph::ObjectNode;
use crate::identity::GlobalId;
use crate::metamodel::{sanitize, ManagedType, Property, PropertyType, Value};
use std::borrow::Cow;

/// Both sides of a node present in the left and right graphs
#[derive(Debug, Clone, Copy)]
pub struct RealNodePair<'a, 'r> {
    left: &'a ObjectNode<'r>,
    right: &'a ObjectNode<'r>,
}

impl<'a, 'r> RealNodePair<'a, 'r> {
    /// Pair two nodes with the same global id
    ///
    /// # Errors
    ///
    /// `Internal` if the nodes have different global ids.
    pub fn new(left: &'a ObjectNode<'r>, right: &'a ObjectNode<'r>) -> Result<Self> {
        if left.global_id() != right.global_id() {
            return Err(GraphDeltaError::Internal {
                message: format!(
                    "cannot pair {} with {}",
                    left.global_id(),
                    right.global_id()
                ),
            });
        }
        Ok(Self { left, right })
    }

    pub fn left(&self) -> &'a ObjectNode<'r> {
        self.left
    }

    pub fn right(&self) -> &'a ObjectNode<'r> {
        self.right
    }
}

/// A right node with no left counterpart
#[derive(Debug, Clone, Copy)]
pub struct FakeNodePair<'a, 'r> {
    right: &'a ObjectNode<'r>,
}

impl<'a, 'r> FakeNodePair<'a, 'r> {
    pub fn new(right: &'a ObjectNode<'r>) -> Self {
        Self { right }
    }

    /// Always fails: a fake pair has no left node
    ///
    /// # Errors
    ///
    /// Always `NotImplemented`.
    pub fn left(&self) -> Result<&'a ObjectNode<'r>> {
        Err(GraphDeltaError::NotImplemented {
            op: "FakeNodePair::left".to_string(),
        })
    }

    pub fn right(&self) -> &'a ObjectNode<'r> {
        self.right
    }

    pub fn is_null_on_both_sides(&self, property: &Property) -> bool {
        self.right.property_value(property).is_null()
    }

    /// Default of the property's declared type, never the right value
    pub fn left_property_value(&self, property: &Property) -> Value {
        property.default_value()
    }

    pub fn left_dehydrated_property_value_and_sanitize(
        &self,
        property: &Property,
        property_type: &PropertyType<'_>,
    ) -> Value {
        sanitize(property.default_value(), property_type)
    }
}

/// Uniform view over a real or fake pair
#[derive(Debug, Clone, Copy)]
pub enum NodePair<'a, 'r> {
    Real(RealNodePair<'a, 'r>),
    Fake(FakeNodePair<'a, 'r>),
}

impl<'a, 'r> NodePair<'a, 'r> {
    pub fn is_fake(&self) -> bool {
        matches!(self, NodePair::Fake(_))
    }

    pub fn right(&self) -> &'a ObjectNode<'r> {
        match self {
            NodePair::Real(pair) => pair.right(),
            NodePair::Fake(pair) => pair.right(),
        }
    }

    /// Left node
    ///
    /// # Errors
    ///
    /// `NotImplemented` on a fake pair.
    pub fn left(&self) -> Result<&'a ObjectNode<'r>> {
        match self {
            NodePair::Real(pair) => Ok(pair.left()),
            NodePair::Fake(pair) => pair.left(),
        }
    }

    pub fn managed_type(&self) -> &'r ManagedType {
        self.right().managed_type()
    }

    pub fn global_id(&self) -> &'a GlobalId {
        self.right().global_id()
    }

    pub fn properties(&self) -> &'r [Property] {
        self.managed_type().properties()
    }

    pub fn is_null_on_both_sides(&self, property: &Property) -> bool {
        match self {
            NodePair::Real(pair) => {
                pair.left.property_value(property).is_null()
                    && pair.right.property_value(property).is_null()
            }
            NodePair::Fake(pair) => pair.is_null_on_both_sides(property),
        }
    }

    pub fn left_property_value(&self, property: &Property) -> Cow<'a, Value> {
        match self {
            NodePair::Real(pair) => Cow::Borrowed(pair.left.property_value(property)),
            NodePair::Fake(pair) => Cow::Owned(pair.left_property_value(property)),
        }
    }

    pub fn right_property_value(&self, property: &Property) -> &'a Value {
        self.right().property_value(property)
    }

    pub fn left_dehydrated_property_value_and_sanitize(
        &self,
        property: &Property,
        property_type: &PropertyType<'_>,
    ) -> Value {
        match self {
            NodePair::Real(pair) => sanitize(
                pair.left.dehydrated_property_value(property).clone(),
                property_type,
            ),
            NodePair::Fake(pair) => {
                pair.left_dehydrated_property_value_and_sanitize(property, property_type)
            }
        }
    }

    pub fn right_dehydrated_property_value_and_sanitize(
        &self,
        property: &Property,
        property_type: &PropertyType<'_>,
    ) -> Value {
        sanitize(
            self.right().dehydrated_property_value(property).clone(),
            property_type,
        )
    }

    pub fn left_reference(&self, property: &Property) -> Option<&'a GlobalId> {
        match self {
            NodePair::Real(pair) => pair.left.reference(property),
            NodePair::Fake(_) => None,
        }
    }

    pub fn right_reference(&self, property: &Property) -> Option<&'a GlobalId> {
        self.right().reference(property)
    }

    pub fn left_references(&self, property: &Property) -> Vec<GlobalId> {
        match self {
            NodePair::Real(pair) => pair.left.references(property),
            NodePair::Fake(_) => Vec::new(),
        }
    }

    pub fn right_references(&self, property: &Property) -> Vec<GlobalId> {
        self.right().references(property)
    }
}

impl<'a, 'r> From<RealNodePair<'a, 'r>> for NodePair<'a, 'r> {
    fn from(pair: RealNodePair<'a, 'r>) -> Self {
        NodePair::Real(pair)
    }
}

impl<'a, 'r> From<FakeNodePair<'a, 'r>> for NodePair<'a, 'r> {
    fn from(pair: FakeNodePair<'a, 'r>) -> Self {
        NodePair::Fake(pair)
    }
}
