use crate::metamodel::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Canonical, type-qualified identity of an object node
///
/// Equality, ordering and hashing use [`GlobalId::value`] only, so ids read
/// back from storage compare equal to freshly computed ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlobalId {
    Instance(InstanceId),
    ValueObject(ValueObjectIdWithOwner),
    UnboundedValueObject(UnboundedValueObjectId),
}

impl GlobalId {
    /// Canonical string form
    pub fn value(&self) -> String {
        match self {
            GlobalId::Instance(id) => id.value(),
            GlobalId::ValueObject(id) => id.value(),
            GlobalId::UnboundedValueObject(id) => id.value(),
        }
    }

    /// Name of the managed type this id identifies
    pub fn type_name(&self) -> &str {
        match self {
            GlobalId::Instance(id) => id.type_name(),
            GlobalId::ValueObject(id) => id.type_name(),
            GlobalId::UnboundedValueObject(id) => id.type_name(),
        }
    }

    pub fn as_instance_id(&self) -> Option<&InstanceId> {
        match self {
            GlobalId::Instance(id) => Some(id),
            _ => None,
        }
    }

    /// Owning node of an embedded value object
    pub fn owner_id(&self) -> Option<&GlobalId> {
        match self {
            GlobalId::ValueObject(id) => Some(id.owner_id()),
            _ => None,
        }
    }
}

impl PartialEq for GlobalId {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for GlobalId {}

impl Hash for GlobalId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl PartialOrd for GlobalId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GlobalId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<InstanceId> for GlobalId {
    fn from(id: InstanceId) -> Self {
        GlobalId::Instance(id)
    }
}

impl From<ValueObjectIdWithOwner> for GlobalId {
    fn from(id: ValueObjectIdWithOwner) -> Self {
        GlobalId::ValueObject(id)
    }
}

impl From<UnboundedValueObjectId> for GlobalId {
    fn from(id: UnboundedValueObjectId) -> Self {
        GlobalId::UnboundedValueObject(id)
    }
}

/// Identity of an entity instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceId {
    type_name: String,
    local_id: Box<Value>,
    local_id_string: String,
}

impl InstanceId {
    /// Built by [`InstanceIdFactory`](crate::identity::InstanceIdFactory), which
    /// guarantees `local_id_string` is derived from `local_id`.
    pub(crate) fn new(type_name: impl Into<String>, local_id: Value, local_id_string: String) -> Self {
        Self {
            type_name: type_name.into(),
            local_id: Box::new(local_id),
            local_id_string,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Dehydrated local id
    pub fn local_id(&self) -> &Value {
        &self.local_id
    }

    pub fn local_id_string(&self) -> &str {
        &self.local_id_string
    }

    pub fn value(&self) -> String {
        format!("{}/{}", self.type_name, self.local_id_string)
    }
}

impl PartialEq for InstanceId {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.local_id_string == other.local_id_string
    }
}

impl Eq for InstanceId {}

/// Identity of a value object embedded in another node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueObjectIdWithOwner {
    type_name: String,
    owner: Box<GlobalId>,
    fragment: String,
}

impl ValueObjectIdWithOwner {
    pub fn new(type_name: impl Into<String>, owner: GlobalId, fragment: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            owner: Box::new(owner),
            fragment: fragment.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn owner_id(&self) -> &GlobalId {
        &self.owner
    }

    /// Property path from the owner, e.g. `address` or `addresses/0`
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn value(&self) -> String {
        format!("{}#{}", self.owner.value(), self.fragment)
    }
}

/// Identity of a value object that is itself the graph root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnboundedValueObjectId {
    type_name: String,
}

impl UnboundedValueObjectId {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn value(&self) -> String {
        format!("{}/", self.type_name)
    }
}
