use thiserror::Error;

/// Result type alias using GraphDeltaError
pub type Result<T> = std::result::Result<T, GraphDeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and audit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GdErrorKind {
    // Contract
    /// Operation structurally unavailable on this value (e.g. left side of a fake pair)
    NotImplemented,
    /// A required argument was null/absent
    NullArgument,

    // Metamodel shape
    /// Entity id property is classified outside {Entity, ValueObject, PrimitiveOrValue}
    UnsupportedIdType,
    UnknownType,
    UnknownProperty,
    DuplicateType,
    DuplicateProperty,
    MissingIdProperty,
    /// Entity-keyed-by-entity id chain loops back on itself
    IdCycle,

    // Graph data
    NullId,
    TypeMismatch,

    // Generic
    Serialization,
    Internal,
}

impl GdErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            GdErrorKind::NotImplemented => "ERR_NOT_IMPLEMENTED",
            GdErrorKind::NullArgument => "ERR_NULL_ARGUMENT",
            GdErrorKind::UnsupportedIdType => "ERR_UNSUPPORTED_ID_TYPE",
            GdErrorKind::UnknownType => "ERR_UNKNOWN_TYPE",
            GdErrorKind::UnknownProperty => "ERR_UNKNOWN_PROPERTY",
            GdErrorKind::DuplicateType => "ERR_DUPLICATE_TYPE",
            GdErrorKind::DuplicateProperty => "ERR_DUPLICATE_PROPERTY",
            GdErrorKind::MissingIdProperty => "ERR_MISSING_ID_PROPERTY",
            GdErrorKind::IdCycle => "ERR_ID_CYCLE",
            GdErrorKind::NullId => "ERR_NULL_ID",
            GdErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            GdErrorKind::Serialization => "ERR_SERIALIZATION",
            GdErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for kinds that indicate a bug in the calling driver rather than bad data
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, GdErrorKind::NotImplemented | GdErrorKind::NullArgument)
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, type, property, global id) for diagnosis.
#[derive(Debug, Clone)]
pub struct GdError {
    kind: GdErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    property: Option<String>,
    global_id: Option<String>,
    message: String,
    source: Option<Box<GdError>>,
}

impl GdError {
    /// Create a new error with the specified kind
    pub fn new(kind: GdErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            property: None,
            global_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add managed type context
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add property context
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Add global id context
    pub fn with_global_id(mut self, global_id: impl Into<String>) -> Self {
        self.global_id = Some(global_id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: GdError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> GdErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    pub fn global_id(&self) -> Option<&str> {
        self.global_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&GdError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for GdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(property) = &self.property {
            write!(f, " (property: {})", property)?;
        }
        if let Some(global_id) = &self.global_id {
            write!(f, " (global_id: {})", global_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for GdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for metamodel, identity, graph and pairing operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphDeltaError {
    // ===== Contract Violations =====
    /// Operation is structurally unavailable on the receiver
    #[error("Not implemented: {op}")]
    NotImplemented { op: String },

    /// A required argument was null
    #[error("Null argument `{argument}` passed to {op}")]
    NullArgument { op: String, argument: String },

    // ===== Metamodel Errors =====
    /// Entity id property type is not Entity, ValueObject or PrimitiveOrValue
    #[error("Id type not supported: id property type {id_type} of entity {owner}")]
    UnsupportedIdType { id_type: String, owner: String },

    /// Named type is not registered
    #[error("Unknown managed type: {type_name}")]
    UnknownType { type_name: String },

    /// Property is not declared on the type
    #[error("Unknown property {property} on type {type_name}")]
    UnknownProperty { type_name: String, property: String },

    /// Type registered twice
    #[error("Managed type already registered: {type_name}")]
    DuplicateType { type_name: String },

    /// Property declared twice on the same type
    #[error("Property {property} declared twice on type {type_name}")]
    DuplicateProperty { type_name: String, property: String },

    /// Entity names an id property it does not declare
    #[error("Entity {type_name} declares id property {property} but has no such property")]
    MissingIdProperty { type_name: String, property: String },

    /// Entity id chain refers back to itself
    #[error("Id chain of entity {type_name} is cyclic")]
    IdCycle { type_name: String },

    // ===== Graph Errors =====
    /// Entity instance has a null id
    #[error("Entity {type_name} instance has null id")]
    NullId { type_name: String },

    /// Value shape does not match the declared property type
    #[error("Type mismatch on {type_name}.{property}: expected {expected}, found {found}")]
    TypeMismatch {
        type_name: String,
        property: String,
        expected: String,
        found: String,
    },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from GraphDeltaError to GdError
impl From<GraphDeltaError> for GdError {
    fn from(err: GraphDeltaError) -> Self {
        match err {
            GraphDeltaError::NotImplemented { op } => GdError::new(GdErrorKind::NotImplemented)
                .with_message(format!("{} is not available", op))
                .with_op(op),

            GraphDeltaError::NullArgument { op, argument } => {
                GdError::new(GdErrorKind::NullArgument)
                    .with_op(op)
                    .with_message(format!("argument `{}` must not be null", argument))
            }

            GraphDeltaError::UnsupportedIdType { id_type, owner } => {
                GdError::new(GdErrorKind::UnsupportedIdType)
                    .with_type_name(owner)
                    .with_message(format!("id property type {} is not supported", id_type))
            }

            GraphDeltaError::UnknownType { type_name } => GdError::new(GdErrorKind::UnknownType)
                .with_type_name(type_name)
                .with_message("Managed type is not registered"),

            GraphDeltaError::UnknownProperty {
                type_name,
                property,
            } => GdError::new(GdErrorKind::UnknownProperty)
                .with_type_name(type_name)
                .with_property(property)
                .with_message("Property is not declared"),

            GraphDeltaError::DuplicateType { type_name } => {
                GdError::new(GdErrorKind::DuplicateType)
                    .with_type_name(type_name)
                    .with_message("Managed type already registered")
            }

            GraphDeltaError::DuplicateProperty {
                type_name,
                property,
            } => GdError::new(GdErrorKind::DuplicateProperty)
                .with_type_name(type_name)
                .with_property(property)
                .with_message("Property declared twice"),

            GraphDeltaError::MissingIdProperty {
                type_name,
                property,
            } => GdError::new(GdErrorKind::MissingIdProperty)
                .with_type_name(type_name)
                .with_property(property)
                .with_message("Id property is not among the declared properties"),

            GraphDeltaError::IdCycle { type_name } => GdError::new(GdErrorKind::IdCycle)
                .with_type_name(type_name)
                .with_message("Entity id chain is cyclic"),

            GraphDeltaError::NullId { type_name } => GdError::new(GdErrorKind::NullId)
                .with_type_name(type_name)
                .with_message("Entity instance has null id"),

            GraphDeltaError::TypeMismatch {
                type_name,
                property,
                expected,
                found,
            } => GdError::new(GdErrorKind::TypeMismatch)
                .with_type_name(type_name)
                .with_property(property)
                .with_message(format!("expected {}, found {}", expected, found)),

            GraphDeltaError::Serialization { message } => {
                GdError::new(GdErrorKind::Serialization).with_message(message)
            }

            GraphDeltaError::Internal { message } => {
                GdError::new(GdErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to GraphDeltaError
impl From<serde_json::Error> for GraphDeltaError {
    fn from(err: serde_json::Error) -> Self {
        GraphDeltaError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (GdErrorKind::NotImplemented, "ERR_NOT_IMPLEMENTED"),
            (GdErrorKind::UnsupportedIdType, "ERR_UNSUPPORTED_ID_TYPE"),
            (GdErrorKind::NullArgument, "ERR_NULL_ARGUMENT"),
            (GdErrorKind::IdCycle, "ERR_ID_CYCLE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_contract_violation_kinds() {
        assert!(GdErrorKind::NotImplemented.is_contract_violation());
        assert!(GdErrorKind::NullArgument.is_contract_violation());
        assert!(!GdErrorKind::UnsupportedIdType.is_contract_violation());
    }

    #[test]
    fn test_display_includes_context() {
        let err = GdError::new(GdErrorKind::TypeMismatch)
            .with_op("build_graph")
            .with_type_name("Person")
            .with_property("address")
            .with_message("expected object");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_TYPE_MISMATCH]"));
        assert!(text.contains("build_graph"));
        assert!(text.contains("(type: Person)"));
        assert!(text.contains("(property: address)"));
    }

    #[test]
    fn test_source_chain() {
        let inner = GdError::new(GdErrorKind::NullId).with_type_name("Order");
        let outer = GdError::new(GdErrorKind::Internal).with_source(inner);
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(GdErrorKind::NullId)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
