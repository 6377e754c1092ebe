use graphdelta_core::metamodel::{Instance, Property, TypeDescriptor, TypeRegistry};

/// Registry shared by the integration tests
///
/// - `Person` keyed by `Int`, with text, optional, collection and map fields
/// - `CustomerId` keyed by `Int`, `Order` keyed by a `CustomerId` entity and
///   `Shipment` keyed by an `Order` entity
/// - `Address` value object, used both embedded and as `Parcel`'s id
/// - `Team` keyed by a list, which no id factory supports
#[allow(dead_code)]
pub fn fixture_registry() -> TypeRegistry {
    TypeRegistry::builder()
        .value_type("Money", TypeDescriptor::Float)
        .value_object(
            "Address",
            vec![
                Property::new("city", TypeDescriptor::Text),
                Property::new("zip", TypeDescriptor::Int),
            ],
        )
        .entity(
            "Person",
            "id",
            vec![
                Property::new("id", TypeDescriptor::Int),
                Property::new("name", TypeDescriptor::Text),
                Property::new("age", TypeDescriptor::Int),
                Property::new("salary", TypeDescriptor::named("Money")),
                Property::new("address", TypeDescriptor::named("Address")),
                Property::new(
                    "manager",
                    TypeDescriptor::optional(TypeDescriptor::named("Person")),
                ),
                Property::new("nicknames", TypeDescriptor::list(TypeDescriptor::Text)),
                Property::new("tags", TypeDescriptor::set(TypeDescriptor::Text)),
                Property::new("scores", TypeDescriptor::map(TypeDescriptor::Int)),
            ],
        )
        .entity(
            "CustomerId",
            "id",
            vec![Property::new("id", TypeDescriptor::Int)],
        )
        .entity(
            "Order",
            "id",
            vec![
                Property::new("id", TypeDescriptor::named("CustomerId")),
                Property::new("total", TypeDescriptor::named("Money")),
            ],
        )
        .entity(
            "Shipment",
            "order",
            vec![
                Property::new("order", TypeDescriptor::named("Order")),
                Property::new("carrier", TypeDescriptor::Text),
            ],
        )
        .entity(
            "Parcel",
            "destination",
            vec![
                Property::new("destination", TypeDescriptor::named("Address")),
                Property::new("weight", TypeDescriptor::Float),
            ],
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

/// `Person` with only id and name set
#[allow(dead_code)]
pub fn person(id: i64, name: &str) -> Instance {
    Instance::new("Person").with("id", id).with("name", name)
}

#[allow(dead_code)]
pub fn address(city: &str, zip: i64) -> Instance {
    Instance::new("Address").with("city", city).with("zip", zip)
}
