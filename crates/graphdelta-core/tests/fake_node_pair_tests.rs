mod common;

use common::{fixture_registry, person};
use graphdelta_core::diff::{FakeNodePair, NodePair};
use graphdelta_core::errors::{GdError, GdErrorKind, GraphDeltaError};
use graphdelta_core::graph::build_graph;
use graphdelta_core::metamodel::{Instance, Value};
use std::collections::BTreeMap;

#[test]
fn test_person_scenario_right_only() {
    // GIVEN Person{id: 5, name: "Ann"} exists only on the right
    let registry = fixture_registry();
    let graph = build_graph(&registry, &person(5, "Ann")).unwrap();
    let node = graph.root().unwrap();
    let pair: NodePair = FakeNodePair::new(node).into();

    // THEN right() is the node and left() fails
    assert_eq!(pair.right().global_id(), node.global_id());
    assert_eq!(pair.global_id().value(), "Person/5");
    assert_eq!(pair.managed_type().name(), "Person");
    let err = pair.left().unwrap_err();
    assert!(matches!(err, GraphDeltaError::NotImplemented { .. }));
    let gd: GdError = err.into();
    assert_eq!(gd.kind(), GdErrorKind::NotImplemented);
    assert!(gd.kind().is_contract_violation());

    // AND name reads "Ann" on the right and the default on the left
    let name = pair.managed_type().property("name").unwrap();
    assert_eq!(pair.right_property_value(name), &Value::from("Ann"));
    assert_eq!(pair.left_property_value(name).as_ref(), &Value::Null);
}

#[test]
fn test_left_values_are_declared_defaults() {
    let registry = fixture_registry();
    let full = person(1, "Ann")
        .with("age", 40)
        .with("nicknames", vec![Value::from("A")])
        .with("tags", vec![Value::from("x")])
        .with("scores", Value::Map(BTreeMap::from([("q1".to_string(), Value::Int(3))])));
    let graph = build_graph(&registry, &full).unwrap();
    let pair: NodePair = FakeNodePair::new(graph.root().unwrap()).into();
    let managed = pair.managed_type();

    let expected = [
        ("age", Value::Int(0)),
        ("salary", Value::Null),
        ("address", Value::Null),
        ("manager", Value::Null),
        ("nicknames", Value::List(Vec::new())),
        ("tags", Value::List(Vec::new())),
        ("scores", Value::Map(BTreeMap::new())),
    ];
    for (name, default) in expected {
        let property = managed.property(name).unwrap();
        assert_eq!(
            pair.left_property_value(property).as_ref(),
            &default,
            "default of {}",
            name
        );
    }
}

#[test]
fn test_left_dehydrated_value_is_sanitized_default() {
    let registry = fixture_registry();
    let graph = build_graph(&registry, &person(1, "Ann")).unwrap();
    let pair: NodePair = FakeNodePair::new(graph.root().unwrap()).into();
    let tags = pair.managed_type().property("tags").unwrap();
    let tags_type = registry.classify(tags.generic_type()).unwrap();

    assert_eq!(
        pair.left_dehydrated_property_value_and_sanitize(tags, &tags_type),
        Value::List(Vec::new())
    );
}

#[test]
fn test_null_on_both_sides_follows_right_value() {
    let registry = fixture_registry();
    let graph = build_graph(&registry, &person(1, "Ann")).unwrap();
    let pair: NodePair = FakeNodePair::new(graph.root().unwrap()).into();

    for property in pair.properties() {
        assert_eq!(
            pair.is_null_on_both_sides(property),
            pair.right_property_value(property).is_null(),
            "property {}",
            property.name()
        );
    }
}

#[test]
fn test_references_only_on_the_right() {
    let registry = fixture_registry();
    let root = person(1, "Ann").with("manager", person(2, "Bob"));
    let graph = build_graph(&registry, &root).unwrap();
    let pair: NodePair = FakeNodePair::new(graph.root().unwrap()).into();
    let manager = pair.managed_type().property("manager").unwrap();

    assert!(pair.left_reference(manager).is_none());
    assert!(pair.left_references(manager).is_empty());
    assert_eq!(pair.right_reference(manager).unwrap().value(), "Person/2");
    assert_eq!(pair.right_references(manager).len(), 1);
}

#[test]
fn test_properties_in_declaration_order() {
    let registry = fixture_registry();
    let graph = build_graph(&registry, &Instance::new("CustomerId").with("id", 9)).unwrap();
    let pair: NodePair = FakeNodePair::new(graph.root().unwrap()).into();
    let names: Vec<&str> = pair.properties().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["id"]);
}
