//! The structured error record
//!
//! One `ErrorRecord` represents one diagnosable failure occurrence. It is
//! assembled once at the failure site, read-only afterwards, and consumed
//! any number of times by the publish and raise operations. The bus is a
//! collaborator passed in by the caller; the record never owns it.

use std::backtrace::Backtrace;

use chrono::{DateTime, Utc};
use serde::Serialize;

use faultcast_bus::EventBus;
use faultcast_core_types::{schema, CorrelationId};

use crate::emit::EmitOptions;
use crate::errors::{RaisedError, RecordError, Result};
use crate::exception_code::ExceptionCode;
use crate::level::Level;
use crate::projection::{FieldSelector, RecordProjection};

/// The bus an error record fans out over
pub type ErrorBus = EventBus<ErrorRecord>;

/// Default machine status classification (HTTP-style)
pub const DEFAULT_STATUS: u16 = 500;

/// One diagnosable failure occurrence
///
/// All fields are private and immutable after construction; builder-style
/// `with_*` methods consume `self` and are only usable while the record is
/// still being assembled. `correlation_id`, `stack` and `timestamp` are
/// captured unconditionally at construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    message: String,
    level: Level,
    correlation_id: CorrelationId,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception_code: Option<ExceptionCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    specific_exception: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<String>,
    stack: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    timestamp: DateTime<Utc>,
}

impl ErrorRecord {
    /// Create a record for `message`
    ///
    /// Fails with [`RecordError::EmptyMessage`] when the message is empty
    /// or whitespace-only. Captures the stack trace, timestamp and a fresh
    /// correlation id unconditionally; `system` defaults from the
    /// `SYSTEM_NAME` environment variable when present.
    pub fn new(message: impl Into<String>) -> Result<Self> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(RecordError::EmptyMessage);
        }
        Ok(Self {
            message,
            level: Level::default(),
            correlation_id: CorrelationId::new(),
            status: DEFAULT_STATUS,
            exception_code: None,
            specific_exception: None,
            entity: None,
            action: None,
            data: None,
            created_by: None,
            stack: Backtrace::force_capture().to_string(),
            system: std::env::var(schema::ENV_SYSTEM_NAME).ok(),
            timestamp: Utc::now(),
        })
    }

    /// Set the severity level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Override the generated correlation id
    pub fn with_correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    /// Set the machine status classification
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Set the coarse failure classification
    pub fn with_exception_code(mut self, code: ExceptionCode) -> Self {
        self.exception_code = Some(code);
        self
    }

    /// Set the fine-grained, free-form classification
    pub fn with_specific_exception(mut self, name: impl Into<String>) -> Self {
        self.specific_exception = Some(name.into());
        self
    }

    /// Set the implicated subsystem or resource
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the operation in progress when the failure occurred
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Attach a free-form structured payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the identity of the originating actor or component
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Override the env-supplied owning system name
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Override the generated capture time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the severity level
    pub fn level(&self) -> Level {
        self.level
    }

    /// Get the correlation id
    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    /// Get the machine status classification
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the coarse failure classification, if any
    pub fn exception_code(&self) -> Option<ExceptionCode> {
        self.exception_code
    }

    /// Get the fine-grained classification, if any
    pub fn specific_exception(&self) -> Option<&str> {
        self.specific_exception.as_deref()
    }

    /// Get the implicated subsystem or resource, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the in-progress operation, if any
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Get the structured payload, if any
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    /// Get the originating actor, if any
    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    /// Get the captured stack trace text
    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// Get the owning system name, if any
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    /// Get the capture time
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Project the selected, currently-set fields into a new value
    ///
    /// A selection that hits no set field degrades to a minimal projection
    /// containing the message only, for every selector shape.
    pub fn project(&self, selector: &FieldSelector) -> RecordProjection {
        let mut projection = RecordProjection::default();
        if selector.message {
            projection.message = Some(self.message.clone());
        }
        if selector.level {
            projection.level = Some(self.level);
        }
        if selector.correlation_id {
            projection.correlation_id = Some(self.correlation_id.clone());
        }
        if selector.status {
            projection.status = Some(self.status);
        }
        if selector.exception_code {
            projection.exception_code = self.exception_code;
        }
        if selector.specific_exception {
            projection.specific_exception = self.specific_exception.clone();
        }
        if selector.entity {
            projection.entity = self.entity.clone();
        }
        if selector.action {
            projection.action = self.action.clone();
        }
        if selector.data {
            projection.data = self.data.clone();
        }
        if selector.created_by {
            projection.created_by = self.created_by.clone();
        }
        if selector.stack {
            projection.stack = Some(self.stack.clone());
        }
        if selector.system {
            projection.system = self.system.clone();
        }
        if selector.timestamp {
            projection.timestamp = Some(self.timestamp);
        }
        if projection.is_empty() {
            projection.message = Some(self.message.clone());
        }
        projection
    }

    /// Every set field (unset fields stay absent)
    pub fn all_fields(&self) -> RecordProjection {
        self.project(&FieldSelector::all())
    }

    /// `"[<level>] <message>"` for quick human consumption
    pub fn display_message(&self) -> String {
        format!("[{}] {}", self.level, self.message)
    }

    /// Fan the record out over the bus, full record as payload
    ///
    /// `None` options, or `error_only` set, publish once to the `"error"`
    /// topic and short-circuit. Otherwise each enabled dimension that is
    /// set on the record publishes under its derived topic, in this fixed
    /// order: error, level, status, exception code, specific exception,
    /// entity, action, system, created-by. Returns `&self` for chaining.
    pub fn publish(&self, bus: &ErrorBus, options: Option<&EmitOptions>) -> &Self {
        let Some(options) = options.filter(|options| !options.error_only) else {
            bus.publish(schema::TOPIC_ERROR, self);
            tracing::debug!(
                correlation_id = %self.correlation_id,
                "record published under the error topic only"
            );
            return self;
        };
        let mut topics = 0usize;
        if options.error {
            bus.publish(schema::TOPIC_ERROR, self);
            topics += 1;
        }
        if options.level {
            bus.publish(self.level.as_str(), self);
            topics += 1;
        }
        if options.status {
            bus.publish(&self.status.to_string(), self);
            topics += 1;
        }
        if options.exception_code {
            if let Some(code) = self.exception_code {
                bus.publish(code.code(), self);
                topics += 1;
            }
        }
        if options.specific_exception {
            if let Some(name) = &self.specific_exception {
                bus.publish(name, self);
                topics += 1;
            }
        }
        if options.entity {
            if let Some(entity) = &self.entity {
                bus.publish(entity, self);
                topics += 1;
            }
        }
        if options.action {
            if let Some(action) = &self.action {
                bus.publish(action, self);
                topics += 1;
            }
        }
        if options.system {
            if let Some(system) = &self.system {
                bus.publish(system, self);
                topics += 1;
            }
        }
        if options.created_by {
            if let Some(created_by) = &self.created_by {
                bus.publish(created_by, self);
                topics += 1;
            }
        }
        tracing::debug!(
            correlation_id = %self.correlation_id,
            topics,
            "record fan-out complete"
        );
        self
    }

    /// Build the terminal payload a raise operation would carry
    ///
    /// Projects through `selector` (default: correlation id, message, data,
    /// level, status, timestamp) and serializes the projection to its
    /// canonical text form. This is the non-unwinding variant for call
    /// sites that propagate with `?`; [`ErrorRecord::raise`] wraps it.
    pub fn raised(&self, selector: Option<&FieldSelector>) -> Result<RaisedError> {
        let default_selector = FieldSelector::raise_default();
        let selector = selector.unwrap_or(&default_selector);
        let projection = self.project(selector);
        let payload =
            serde_json::to_string(&projection).map_err(|err| RecordError::Serialization {
                message: err.to_string(),
            })?;
        Ok(RaisedError::new(payload))
    }

    /// Publish to the `"error"` topic, then raise; never returns
    ///
    /// The unwind payload is a [`RaisedError`] whose `Display` is the
    /// serialized projection. A serialization failure escalates through
    /// the same unwind path as a [`RecordError`] (fatal, not caught).
    pub fn raise(&self, bus: &ErrorBus, selector: Option<&FieldSelector>) -> ! {
        self.publish(bus, Some(&EmitOptions::error_only()));
        self.raise_without_publish(selector)
    }

    /// Raise without the initial publish; never returns
    ///
    /// For call sites that already published or want silent escalation.
    pub fn raise_without_publish(&self, selector: Option<&FieldSelector>) -> ! {
        match self.raised(selector) {
            Ok(raised) => std::panic::panic_any(raised),
            Err(err) => std::panic::panic_any(err),
        }
    }
}

impl std::fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
