//! Field-filtered projections of an error record
//!
//! A [`FieldSelector`] names the fields a caller wants exposed; projecting
//! a record through it yields a [`RecordProjection`] holding only the
//! selected, currently-set fields. A selection that hits nothing degrades
//! to a minimal projection carrying the message alone, so a projection is
//! never empty.

use chrono::{DateTime, Utc};
use faultcast_core_types::CorrelationId;
use serde::{Deserialize, Serialize};

use crate::exception_code::ExceptionCode;
use crate::level::Level;

/// Boolean per-field selection mask
///
/// `Default` selects nothing. Construction helpers cover the common
/// shapes; individual fields are public for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSelector {
    pub message: bool,
    pub level: bool,
    pub correlation_id: bool,
    pub status: bool,
    pub exception_code: bool,
    pub specific_exception: bool,
    pub entity: bool,
    pub action: bool,
    pub data: bool,
    pub created_by: bool,
    pub stack: bool,
    pub system: bool,
    pub timestamp: bool,
}

impl FieldSelector {
    /// Select every field
    pub fn all() -> Self {
        Self {
            message: true,
            level: true,
            correlation_id: true,
            status: true,
            exception_code: true,
            specific_exception: true,
            entity: true,
            action: true,
            data: true,
            created_by: true,
            stack: true,
            system: true,
            timestamp: true,
        }
    }

    /// Select nothing (same as `Default`)
    pub fn none() -> Self {
        Self::default()
    }

    /// The default selection used by raise operations:
    /// correlation id, message, data, level, status, timestamp
    pub fn raise_default() -> Self {
        Self {
            correlation_id: true,
            message: true,
            data: true,
            level: true,
            status: true,
            timestamp: true,
            ..Self::default()
        }
    }
}

/// A read-only subset of a record's fields
///
/// Field declaration order is the canonical serialization order; unset
/// fields are omitted entirely, never fabricated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordProjection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<CorrelationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_code: Option<ExceptionCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_exception: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RecordProjection {
    /// Whether no field at all is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
