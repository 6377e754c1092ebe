use crate::metamodel::descriptor::{default_value, TypeDescriptor};
use crate::metamodel::value::Value;

/// A named, typed member of a managed type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    name: String,
    generic_type: TypeDescriptor,
}

impl Property {
    pub fn new(name: impl Into<String>, generic_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            generic_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type, possibly generic
    pub fn generic_type(&self) -> &TypeDescriptor {
        &self.generic_type
    }

    /// Default value for this property's declared shape
    pub fn default_value(&self) -> Value {
        default_value(&self.generic_type)
    }
}
