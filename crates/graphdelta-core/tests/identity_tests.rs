mod common;

use common::{address, fixture_registry};
use graphdelta_core::errors::GraphDeltaError;
use graphdelta_core::identity::GlobalId;
use graphdelta_core::metamodel::{Instance, TypeDescriptor, Value};

#[test]
fn test_primitive_id_create_matches_dehydrated() {
    let registry = fixture_registry();
    let factory = registry.id_factory_for("Person").unwrap();

    let live = factory.create(&Value::Int(5)).unwrap();
    let stored = factory
        .create_from_dehydrated_local_id(&Value::Int(5))
        .unwrap();

    assert_eq!(live, stored);
    assert_eq!(live.value(), "Person/5");
    assert_eq!(live.local_id_string(), "5");
}

#[test]
fn test_entity_keyed_by_entity_dehydrates_to_terminal_id() {
    let registry = fixture_registry();
    let factory = registry.id_factory_for("Order").unwrap();
    let customer = Value::Object(Instance::new("CustomerId").with("id", 42));

    let id = factory.create(&customer).unwrap();

    assert_eq!(id.local_id(), &Value::Int(42));
    assert_eq!(id.local_id_string(), "42");
    assert_eq!(id.value(), "Order/42");
    assert_eq!(
        factory.local_id_dehydrated_type().unwrap(),
        TypeDescriptor::Int
    );

    // The nested factory renders the same string
    let nested = registry.id_factory_for("CustomerId").unwrap();
    assert_eq!(
        factory.local_id_as_string(&Value::Int(42)).unwrap(),
        nested.local_id_as_string(&Value::Int(42)).unwrap()
    );
}

#[test]
fn test_two_level_entity_chain_dehydrates_to_terminal_id() {
    let registry = fixture_registry();
    let factory = registry.id_factory_for("Shipment").unwrap();
    let order = Value::Object(
        Instance::new("Order").with("id", Instance::new("CustomerId").with("id", 42)),
    );

    let id = factory.create(&order).unwrap();

    assert_eq!(id.local_id(), &Value::Int(42));
    assert_eq!(id.local_id_string(), "42");
    assert_eq!(id.value(), "Shipment/42");
    assert_eq!(factory.local_id_as_string(&Value::Int(42)).unwrap(), "42");
    for name in ["Shipment", "Order", "CustomerId"] {
        assert_eq!(
            registry
                .id_factory_for(name)
                .unwrap()
                .local_id_dehydrated_type()
                .unwrap(),
            TypeDescriptor::Int
        );
    }

    let stored = factory
        .create_from_dehydrated_local_id(&Value::Int(42))
        .unwrap();
    assert_eq!(id, stored);
}

#[test]
fn test_entity_keyed_by_reference_matches_live_object() {
    let registry = fixture_registry();
    let customer: GlobalId = registry
        .id_factory_for("CustomerId")
        .unwrap()
        .create(&Value::Int(42))
        .unwrap()
        .into();
    let factory = registry.id_factory_for("Order").unwrap();

    let by_ref = factory.create(&Value::Ref(customer)).unwrap();
    let live = factory
        .create(&Value::Object(Instance::new("CustomerId").with("id", 42)))
        .unwrap();
    assert_eq!(by_ref, live);

    let wrong: GlobalId = registry
        .id_factory_for("Person")
        .unwrap()
        .create(&Value::Int(42))
        .unwrap()
        .into();
    assert!(matches!(
        factory.create(&Value::Ref(wrong)),
        Err(GraphDeltaError::TypeMismatch { .. })
    ));
}

#[test]
fn test_value_object_id_dehydrates_to_canonical_string() {
    let registry = fixture_registry();
    let factory = registry.id_factory_for("Parcel").unwrap();
    let destination = Value::Object(address("Paris", 75001));

    let id = factory.create(&destination).unwrap();

    assert_eq!(id.local_id(), &Value::Text("Paris,75001".to_string()));
    assert_eq!(id.value(), "Parcel/Paris,75001");
    assert_eq!(
        factory.local_id_dehydrated_type().unwrap(),
        TypeDescriptor::Text
    );

    let from_stored = factory
        .create_from_dehydrated_local_id(&Value::Text("Paris,75001".to_string()))
        .unwrap();
    assert_eq!(id, from_stored);
}

#[test]
fn test_unsupported_id_type_names_type_and_owner() {
    let registry = fixture_registry();
    let factory = registry.id_factory_for("Team").unwrap();

    let err = factory
        .create(&Value::List(vec![Value::Int(1), Value::Int(2)]))
        .unwrap_err();

    match err {
        GraphDeltaError::UnsupportedIdType { id_type, owner } => {
            assert_eq!(id_type, "Vec<i64>");
            assert_eq!(owner, "Team");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_equal_ids_from_different_value_representations() {
    let registry = fixture_registry();
    let factory = registry.id_factory_for("Order").unwrap();

    let a = factory
        .create(&Value::Object(Instance::new("CustomerId").with("id", 7)))
        .unwrap();
    let b = factory
        .create_from_dehydrated_local_id(&Value::Int(7))
        .unwrap();

    let a: GlobalId = a.into();
    let b: GlobalId = b.into();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_unknown_entity_factory() {
    let registry = fixture_registry();
    assert!(matches!(
        registry.id_factory_for("Address"),
        Err(GraphDeltaError::UnknownType { .. })
    ));
}

#[test]
fn test_uuid_and_timestamp_ids_render_canonically() {
    use chrono::{TimeZone, Utc};
    use graphdelta_core::metamodel::{Property, TypeRegistry};
    use uuid::Uuid;

    let registry = TypeRegistry::builder()
        .entity("Doc", "id", vec![Property::new("id", TypeDescriptor::Uuid)])
        .entity(
            "Tick",
            "at",
            vec![Property::new("at", TypeDescriptor::Timestamp)],
        )
        .build()
        .unwrap();

    let uuid = Uuid::now_v7();
    let doc = registry
        .id_factory_for("Doc")
        .unwrap()
        .create(&Value::Uuid(uuid))
        .unwrap();
    assert_eq!(doc.value(), format!("Doc/{}", uuid.hyphenated()));

    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let tick = registry
        .id_factory_for("Tick")
        .unwrap()
        .create(&Value::Timestamp(at))
        .unwrap();
    assert_eq!(tick.local_id_string(), "2024-03-01T12:30:00Z");
}
