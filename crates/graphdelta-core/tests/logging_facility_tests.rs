mod common;

use common::{fixture_registry, person};
use graphdelta_core::diff::{compute_diff, DiffOptions};
use graphdelta_core::errors::GraphDeltaError;
use graphdelta_core::logging_facility::test_capture::init_test_capture;
use graphdelta_core::metamodel::Instance;
use graphdelta_core::{log_op_end, log_op_error, log_op_start};
use graphdelta_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_CHANGE_COUNT, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_TYPE_NAME,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = GraphDeltaError::NotImplemented {
        op: "FakeNodePair::left".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(
        error_events[0].field(FIELD_ERR_CODE),
        Some("ERR_NOT_IMPLEMENTED")
    );
}

#[test]
fn test_compute_diff_logs_boundary_events() {
    let capture = init_test_capture();
    let registry = fixture_registry();

    compute_diff(&registry, None, &person(77, "Logged"), &DiffOptions::default()).unwrap();

    let boundary: Vec<_> = capture
        .events_for_op("compute_diff")
        .into_iter()
        .filter(|e| e.field(FIELD_TYPE_NAME) == Some("Person"))
        .collect();
    assert!(boundary
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_START)));

    capture.assert_event_exists("compute_diff", EVENT_END);
    let counted = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_diff") && e.field(FIELD_CHANGE_COUNT).is_some()
    });
    assert!(counted >= 1);
}

#[test]
fn test_compute_diff_logs_error_with_code() {
    let capture = init_test_capture();
    let registry = fixture_registry();

    let err = compute_diff(
        &registry,
        None,
        &Instance::new("UnregisteredForLogging"),
        &DiffOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.code(), "ERR_UNKNOWN_TYPE");

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_diff")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_UNKNOWN_TYPE")
    });
    assert!(errors >= 1);
}
