//! Canonical schema constants for topics, payload keys and diagnostics
//!
//! These constants are the wire contract between record producers and bus
//! listeners; consumers that parse a serialized record index it by these
//! exact keys.

/// The catch-all topic every raised/published record is delivered under
pub const TOPIC_ERROR: &str = "error";

/// Environment variable supplying the default `system` field
pub const ENV_SYSTEM_NAME: &str = "SYSTEM_NAME";

// Serialized payload keys (camelCase, matching the record's wire form)
pub const KEY_MESSAGE: &str = "message";
pub const KEY_LEVEL: &str = "level";
pub const KEY_CORRELATION_ID: &str = "correlationId";
pub const KEY_STATUS: &str = "status";
pub const KEY_EXCEPTION_CODE: &str = "exceptionCode";
pub const KEY_SPECIFIC_EXCEPTION: &str = "specificException";
pub const KEY_ENTITY: &str = "entity";
pub const KEY_ACTION: &str = "action";
pub const KEY_DATA: &str = "data";
pub const KEY_CREATED_BY: &str = "createdBy";
pub const KEY_STACK: &str = "stack";
pub const KEY_SYSTEM: &str = "system";
pub const KEY_TIMESTAMP: &str = "timestamp";

// Field names used in the library's own tracing diagnostics
pub const LOG_FIELD_TOPIC: &str = "topic";
pub const LOG_FIELD_LISTENERS: &str = "listeners";
pub const LOG_FIELD_MAX_LISTENERS: &str = "max_listeners";
pub const LOG_FIELD_ERROR: &str = "error";
