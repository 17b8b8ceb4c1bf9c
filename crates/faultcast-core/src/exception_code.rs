//! Coarse failure classification
//!
//! A closed taxonomy with stable string codes. The code string is both the
//! wire form of the field and the bus topic used for the exception-code
//! fan-out dimension, so it must never change for an existing variant.
//! Fine-grained classification goes in the record's free-form
//! `specific_exception` field instead.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use std::fmt;

/// Coarse classification of a failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionCode {
    Validation,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    Timeout,
    Io,
    Serialization,
    ExternalService,
    Database,
    BusinessRule,
    Internal,
}

impl ExceptionCode {
    /// Every code, for exhaustiveness checks in tests
    pub const ALL: [ExceptionCode; 12] = [
        ExceptionCode::Validation,
        ExceptionCode::NotFound,
        ExceptionCode::Unauthorized,
        ExceptionCode::Forbidden,
        ExceptionCode::Conflict,
        ExceptionCode::Timeout,
        ExceptionCode::Io,
        ExceptionCode::Serialization,
        ExceptionCode::ExternalService,
        ExceptionCode::Database,
        ExceptionCode::BusinessRule,
        ExceptionCode::Internal,
    ];

    /// Get the stable code for this kind; also the bus topic name
    pub fn code(&self) -> &'static str {
        match self {
            ExceptionCode::Validation => "ERR_VALIDATION",
            ExceptionCode::NotFound => "ERR_NOT_FOUND",
            ExceptionCode::Unauthorized => "ERR_UNAUTHORIZED",
            ExceptionCode::Forbidden => "ERR_FORBIDDEN",
            ExceptionCode::Conflict => "ERR_CONFLICT",
            ExceptionCode::Timeout => "ERR_TIMEOUT",
            ExceptionCode::Io => "ERR_IO",
            ExceptionCode::Serialization => "ERR_SERIALIZATION",
            ExceptionCode::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExceptionCode::Database => "ERR_DATABASE",
            ExceptionCode::BusinessRule => "ERR_BUSINESS_RULE",
            ExceptionCode::Internal => "ERR_INTERNAL",
        }
    }

    /// Look a variant up by its stable code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for ExceptionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for ExceptionCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodeVisitor;

        impl Visitor<'_> for CodeVisitor {
            type Value = ExceptionCode;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a stable ERR_* exception code")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                ExceptionCode::from_code(value).ok_or_else(|| {
                    E::custom(format!("unknown exception code: {}", value))
                })
            }
        }

        deserializer.deserialize_str(CodeVisitor)
    }
}
