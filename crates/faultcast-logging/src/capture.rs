//! In-memory capture mode for deterministic logging assertions
//!
//! The bus documents its cap-exceeded and listener-failure policies as
//! `tracing::warn!` diagnostics; this module lets tests observe them
//! without parsing formatted output.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::Visit;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use faultcast_core_types::schema;

/// A captured log event with all its fields
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    /// Formatted event message, when one was supplied
    pub message: Option<String>,
    /// The bus topic the event relates to, when one was recorded
    pub topic: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Whether this is a warning mentioning `needle` in its message
    pub fn is_warning_containing(&self, needle: &str) -> bool {
        self.level == Level::WARN
            && self
                .message
                .as_deref()
                .is_some_and(|m| m.contains(needle))
    }
}

struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

/// Layer that collects events into shared memory
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    pub fn new() -> (Self, CaptureHandle) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = Self {
            events: events.clone(),
        };
        let handle = CaptureHandle { events };
        (layer, handle)
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *metadata.level(),
            message: visitor.fields.get("message").cloned(),
            topic: visitor.fields.get(schema::LOG_FIELD_TOPIC).cloned(),
            fields: visitor.fields,
        };

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Handle for inspecting captured events in tests
#[derive(Clone)]
pub struct CaptureHandle {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    /// Get all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Clear all captured events
    pub fn clear(&self) {
        self.events.lock().map(|mut e| e.clear()).ok();
    }

    /// Count events matching a predicate
    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// Count warnings whose message mentions `needle`
    pub fn count_warnings_containing(&self, needle: &str) -> usize {
        self.count_where(|e| e.is_warning_containing(needle))
    }

    /// Assert that a warning mentioning `needle` was captured
    ///
    /// # Panics
    ///
    /// Panics if no such warning exists
    pub fn assert_warning_containing(&self, needle: &str) {
        let events = self.events();
        let found = events.iter().any(|e| e.is_warning_containing(needle));
        assert!(
            found,
            "Expected a warning containing {:?}, not found in {} captured events",
            needle,
            events.len()
        );
    }
}

static GLOBAL_CAPTURE: OnceLock<CaptureHandle> = OnceLock::new();

/// Install the capture layer as the global subscriber
///
/// Safe to call from every test; the layer is installed once per process
/// and all callers share the same handle. Call [`CaptureHandle::clear`]
/// at the start of a test that counts events.
pub fn init_capture() -> CaptureHandle {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, handle) = CaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            handle
        })
        .clone()
}
