//! Raise semantics: the operation never returns, the unwind payload is the
//! serialized projection, and the pre-raise publish hits the "error" topic
//! exactly once.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use faultcast_core::{
    ErrorBus, ErrorRecord, FieldSelector, Level, RaisedError, RecordProjection,
};

/// Runs `f`, which must unwind, and returns the carried RaisedError.
fn unwind_payload(f: impl FnOnce()) -> RaisedError {
    let unwind = catch_unwind(AssertUnwindSafe(f)).expect_err("raise must never return");
    *unwind
        .downcast::<RaisedError>()
        .expect("unwind payload should be a RaisedError")
}

#[test]
fn test_raise_never_returns_and_payload_parses() {
    let bus = ErrorBus::new();
    let record = ErrorRecord::new("boom").unwrap();

    let raised = unwind_payload(|| record.raise(&bus, None));
    let projection = raised.parse().unwrap();

    assert_eq!(projection.message.as_deref(), Some("boom"));
    assert!(projection.level.is_some());
}

#[test]
fn test_default_message_only_raise() {
    let bus = ErrorBus::new();
    let record = ErrorRecord::new("boom").unwrap();

    let raised = unwind_payload(|| record.raise(&bus, None));
    let projection = raised.parse().unwrap();

    assert_eq!(projection.message.as_deref(), Some("boom"));
    assert_eq!(projection.level, Some(Level::Error));
    assert_eq!(projection.status, Some(500));
    assert!(projection.timestamp.is_some());
    assert!(projection.correlation_id.is_some());
}

#[test]
fn test_raise_publishes_error_topic_once() {
    let bus = ErrorBus::new();
    let counter = Arc::new(AtomicUsize::new(0));

    let counter_clone = Arc::clone(&counter);
    bus.subscribe("error", move |_: &ErrorRecord| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    // Severity topic must not fire: raise is error-only
    let counter_level = Arc::clone(&counter);
    bus.subscribe("critical", move |_: &ErrorRecord| {
        counter_level.fetch_add(100, Ordering::SeqCst);
        Ok(())
    });

    let record = ErrorRecord::new("boom").unwrap().with_level(Level::Critical);
    let _ = unwind_payload(|| record.raise(&bus, None));

    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_raise_without_publish_skips_the_bus() {
    let bus = ErrorBus::new();
    let counter = Arc::new(AtomicUsize::new(0));

    let counter_clone = Arc::clone(&counter);
    bus.subscribe("error", move |_: &ErrorRecord| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let record = ErrorRecord::new("boom").unwrap();
    let raised = unwind_payload(|| record.raise_without_publish(None));

    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(raised.parse().unwrap().message.as_deref(), Some("boom"));
}

#[test]
fn test_raise_with_custom_selector() {
    let bus = ErrorBus::new();
    let record = ErrorRecord::new("order missing")
        .unwrap()
        .with_entity("orders");

    let selector = FieldSelector {
        message: true,
        entity: true,
        ..FieldSelector::default()
    };
    let raised = unwind_payload(|| record.raise(&bus, Some(&selector)));
    let projection = raised.parse().unwrap();

    assert_eq!(projection.message.as_deref(), Some("order missing"));
    assert_eq!(projection.entity.as_deref(), Some("orders"));
    assert!(projection.level.is_none());
    assert!(projection.status.is_none());
}

#[test]
fn test_payload_key_order_is_canonical() {
    let record = ErrorRecord::new("boom")
        .unwrap()
        .with_data(serde_json::json!({"k": 1}));

    let raised = record.raised(None).unwrap();
    let payload = raised.payload();

    // Declaration order of the projection struct: message, level,
    // correlationId, status, data, timestamp for the default selection.
    let positions: Vec<usize> = ["\"message\"", "\"level\"", "\"correlationId\"", "\"status\"", "\"data\"", "\"timestamp\""]
        .iter()
        .map(|key| payload.find(key).expect("key should be present"))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);

    // Deterministic: serializing again yields the identical text
    assert_eq!(record.raised(None).unwrap().payload(), payload);
}

#[test]
fn test_raised_round_trips_through_projection() {
    let record = ErrorRecord::new("boom").unwrap().with_status(404);
    let raised = record.raised(Some(&FieldSelector::all())).unwrap();
    let projection: RecordProjection = raised.parse().unwrap();

    assert_eq!(projection, record.all_fields());
}
