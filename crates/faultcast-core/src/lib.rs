//! Faultcast core - structured error records with topic fan-out
//!
//! This crate provides the `ErrorRecord` value object and its policies:
//! - Construction with derived defaults (capture time, correlation id,
//!   stack trace, env-supplied system name)
//! - Field-filtered projection with a degrade-gracefully fallback
//! - Multi-topic fan-out over an injected [`ErrorBus`], keyed by the
//!   record's own attributes (severity, status, classification, entity,
//!   action, system, actor)
//! - Raising as a terminal, never-returning operation carrying a
//!   serialized snapshot of the record
//!
//! A record is immutable once built; listeners receive a read-only view.

pub mod emit;
pub mod errors;
pub mod exception_code;
pub mod level;
pub mod projection;
pub mod record;

// Re-export commonly used types
pub use emit::EmitOptions;
pub use errors::{RaisedError, RecordError, Result};
pub use exception_code::ExceptionCode;
pub use level::Level;
pub use projection::{FieldSelector, RecordProjection};
pub use record::{ErrorBus, ErrorRecord};

pub use faultcast_bus::{EventBus, ListenerError, SubscriptionHandle};
