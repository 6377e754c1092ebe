//! Declared (generic) property types and their default values.

use crate::metamodel::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Declared type of a property, as written on the domain type
///
/// `Named` refers to a registered managed type (entity, value object or
/// custom value type). Maps are string-keyed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Bool,
    Int,
    Float,
    Text,
    Uuid,
    Timestamp,
    Named(String),
    Optional(Box<TypeDescriptor>),
    List(Box<TypeDescriptor>),
    Set(Box<TypeDescriptor>),
    Map(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Named(name.into())
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Optional(Box::new(inner))
    }

    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(element))
    }

    pub fn set(element: TypeDescriptor) -> Self {
        TypeDescriptor::Set(Box::new(element))
    }

    pub fn map(value: TypeDescriptor) -> Self {
        TypeDescriptor::Map(Box::new(value))
    }

    /// True for the scalar descriptors that need no registry lookup
    pub fn is_builtin_scalar(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Bool
                | TypeDescriptor::Int
                | TypeDescriptor::Float
                | TypeDescriptor::Text
                | TypeDescriptor::Uuid
                | TypeDescriptor::Timestamp
        )
    }

    /// Every `Named` type this descriptor mentions, outermost first
    pub fn named_types(&self) -> Vec<&str> {
        match self {
            TypeDescriptor::Named(name) => vec![name.as_str()],
            TypeDescriptor::Optional(inner)
            | TypeDescriptor::List(inner)
            | TypeDescriptor::Set(inner)
            | TypeDescriptor::Map(inner) => inner.named_types(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Bool => write!(f, "bool"),
            TypeDescriptor::Int => write!(f, "i64"),
            TypeDescriptor::Float => write!(f, "f64"),
            TypeDescriptor::Text => write!(f, "String"),
            TypeDescriptor::Uuid => write!(f, "Uuid"),
            TypeDescriptor::Timestamp => write!(f, "DateTime<Utc>"),
            TypeDescriptor::Named(name) => write!(f, "{}", name),
            TypeDescriptor::Optional(inner) => write!(f, "Option<{}>", inner),
            TypeDescriptor::List(inner) => write!(f, "Vec<{}>", inner),
            TypeDescriptor::Set(inner) => write!(f, "Set<{}>", inner),
            TypeDescriptor::Map(inner) => write!(f, "Map<String, {}>", inner),
        }
    }
}

/// Canonical default value for a declared type
///
/// Zero for numerics and `false` for bool, empty containers for list, set
/// and map shapes, `Null` for everything that may be absent (text, uuid,
/// timestamp, optional and named types).
pub fn default_value(descriptor: &TypeDescriptor) -> Value {
    match descriptor {
        TypeDescriptor::Bool => Value::Bool(false),
        TypeDescriptor::Int => Value::Int(0),
        TypeDescriptor::Float => Value::Float(0.0),
        TypeDescriptor::List(_) | TypeDescriptor::Set(_) => Value::List(Vec::new()),
        TypeDescriptor::Map(_) => Value::Map(BTreeMap::new()),
        TypeDescriptor::Text
        | TypeDescriptor::Uuid
        | TypeDescriptor::Timestamp
        | TypeDescriptor::Named(_)
        | TypeDescriptor::Optional(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values_by_shape() {
        assert_eq!(default_value(&TypeDescriptor::Int), Value::Int(0));
        assert_eq!(default_value(&TypeDescriptor::Float), Value::Float(0.0));
        assert_eq!(default_value(&TypeDescriptor::Bool), Value::Bool(false));
        assert_eq!(default_value(&TypeDescriptor::Text), Value::Null);
        assert_eq!(
            default_value(&TypeDescriptor::list(TypeDescriptor::Int)),
            Value::List(Vec::new())
        );
        assert_eq!(
            default_value(&TypeDescriptor::map(TypeDescriptor::Text)),
            Value::Map(BTreeMap::new())
        );
        assert_eq!(
            default_value(&TypeDescriptor::optional(TypeDescriptor::Int)),
            Value::Null
        );
        assert_eq!(default_value(&TypeDescriptor::named("Address")), Value::Null);
    }

    #[test]
    fn test_display_generic_shapes() {
        let d = TypeDescriptor::map(TypeDescriptor::list(TypeDescriptor::named("Tag")));
        assert_eq!(d.to_string(), "Map<String, Vec<Tag>>");
        assert_eq!(
            TypeDescriptor::optional(TypeDescriptor::Timestamp).to_string(),
            "Option<DateTime<Utc>>"
        );
    }

    #[test]
    fn test_named_types_walks_containers() {
        let d = TypeDescriptor::optional(TypeDescriptor::set(TypeDescriptor::named("Tag")));
        assert_eq!(d.named_types(), vec!["Tag"]);
        assert!(TypeDescriptor::Int.named_types().is_empty());
    }
}
