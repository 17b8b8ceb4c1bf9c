//! Fan-out behavior: short-circuit, fixed topic order, dimension skipping
//! and listener isolation, exercised end-to-end over a real bus.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use faultcast_core::{
    EmitOptions, ErrorBus, ErrorRecord, ExceptionCode, Level, ListenerError,
};

/// Subscribes one recording listener per topic; every delivery appends its
/// topic to a single shared sequence, so the sequence is the publish order.
fn record_topics(bus: &ErrorBus, topics: &[&str]) -> Arc<Mutex<Vec<String>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    for topic in topics {
        let seen = Arc::clone(&seen);
        let topic = topic.to_string();
        bus.subscribe(topic.clone(), move |_: &ErrorRecord| {
            seen.lock().unwrap().push(topic.clone());
            Ok(())
        });
    }
    seen
}

fn sample_record() -> ErrorRecord {
    ErrorRecord::new("user lookup failed")
        .unwrap()
        .with_level(Level::Critical)
        .with_status(404)
        .with_entity("user-service")
}

#[test]
fn test_error_only_short_circuits_other_flags() {
    let bus = ErrorBus::new();
    let seen = record_topics(&bus, &["error", "critical", "404", "user-service"]);

    let options = EmitOptions {
        error_only: true,
        level: true,
        status: true,
        entity: true,
        ..EmitOptions::default()
    };
    sample_record().publish(&bus, Some(&options));

    assert_eq!(*seen.lock().unwrap(), vec!["error".to_string()]);
}

#[test]
fn test_no_options_means_error_only() {
    let bus = ErrorBus::new();
    let seen = record_topics(&bus, &["error", "critical"]);

    sample_record().publish(&bus, None);

    assert_eq!(*seen.lock().unwrap(), vec!["error".to_string()]);
}

#[test]
fn test_all_flags_false_publishes_nothing() {
    let bus = ErrorBus::new();
    let seen = record_topics(&bus, &["error", "critical", "404"]);

    sample_record().publish(&bus, Some(&EmitOptions::default()));

    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_full_fanout_in_fixed_order() {
    let bus = ErrorBus::new();
    let seen = record_topics(&bus, &["error", "critical", "404", "user-service"]);

    let options = EmitOptions {
        error: true,
        level: true,
        status: true,
        entity: true,
        ..EmitOptions::default()
    };
    sample_record().publish(&bus, Some(&options));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "error".to_string(),
            "critical".to_string(),
            "404".to_string(),
            "user-service".to_string(),
        ]
    );
}

#[test]
fn test_unset_dimensions_are_skipped() {
    let bus = ErrorBus::new();
    let seen = record_topics(&bus, &["error", "critical", "404"]);

    // specific_exception, action, system and created_by are unset on the
    // record, so enabling them must not produce publishes.
    let options = EmitOptions::all();
    sample_record().publish(&bus, Some(&options));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "error".to_string(),
            "critical".to_string(),
            "404".to_string(),
        ]
    );
}

#[test]
fn test_classification_and_actor_topics() {
    let bus = ErrorBus::new();
    let seen = record_topics(
        &bus,
        &["ERR_TIMEOUT", "UpstreamTimeout", "sync", "billing", "cron"],
    );

    let record = ErrorRecord::new("upstream timed out")
        .unwrap()
        .with_exception_code(ExceptionCode::Timeout)
        .with_specific_exception("UpstreamTimeout")
        .with_action("sync")
        .with_system("billing")
        .with_created_by("cron");

    let options = EmitOptions {
        exception_code: true,
        specific_exception: true,
        action: true,
        system: true,
        created_by: true,
        ..EmitOptions::default()
    };
    record.publish(&bus, Some(&options));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "ERR_TIMEOUT".to_string(),
            "UpstreamTimeout".to_string(),
            "sync".to_string(),
            "billing".to_string(),
            "cron".to_string(),
        ]
    );
}

#[test]
fn test_listeners_receive_the_full_record() {
    let bus = ErrorBus::new();
    let received = Arc::new(Mutex::new(None));

    let received_clone = Arc::clone(&received);
    bus.subscribe("critical", move |record: &ErrorRecord| {
        *received_clone.lock().unwrap() = Some(record.clone());
        Ok(())
    });

    let options = EmitOptions {
        level: true,
        ..EmitOptions::default()
    };
    let original = sample_record();
    original.publish(&bus, Some(&options));

    let received = received.lock().unwrap();
    let record = received.as_ref().expect("listener should have run");
    // Full record, not a projection: fields outside the topic dimension
    assert_eq!(record.message(), "user lookup failed");
    assert_eq!(record.entity(), Some("user-service"));
    assert_eq!(record.correlation_id(), original.correlation_id());
}

#[test]
fn test_publish_chains() {
    let bus = ErrorBus::new();
    let counter = Arc::new(AtomicUsize::new(0));

    let counter_clone = Arc::clone(&counter);
    bus.subscribe("error", move |_: &ErrorRecord| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let record = sample_record();
    record
        .publish(&bus, Some(&EmitOptions::error_only()))
        .publish(&bus, None);

    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_failing_listener_is_isolated() {
    let bus = ErrorBus::new();
    let counter = Arc::new(AtomicUsize::new(0));

    bus.subscribe("error", |_: &ErrorRecord| {
        Err(ListenerError::new("sink offline"))
    });
    let counter_clone = Arc::clone(&counter);
    bus.subscribe("error", move |_: &ErrorRecord| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    sample_record().publish(&bus, None);

    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failure_in_one_topic_does_not_stop_later_topics() {
    let bus = ErrorBus::new();
    let seen = record_topics(&bus, &["critical", "404"]);

    // A failing listener on "error" runs first in the fan-out sequence
    bus.subscribe("error", |_: &ErrorRecord| {
        Err(ListenerError::new("always fails"))
    });

    let options = EmitOptions {
        error: true,
        level: true,
        status: true,
        ..EmitOptions::default()
    };
    sample_record().publish(&bus, Some(&options));

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["critical".to_string(), "404".to_string()]
    );
}
