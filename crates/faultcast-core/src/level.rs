//! Severity levels
//!
//! The level name doubles as a bus topic, so listeners can subscribe to a
//! whole severity class (`"critical"`, `"warning"`, ...) independently of
//! the catch-all `"error"` topic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an error record; defaults to `Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
    #[default]
    Error,
    Debug,
    Success,
    Critical,
    Alert,
    Emergency,
}

impl Level {
    /// All levels, in no significant order
    pub const ALL: [Level; 8] = [
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Debug,
        Level::Success,
        Level::Critical,
        Level::Alert,
        Level::Emergency,
    ];

    /// The lowercase name; also the bus topic for this severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Debug => "debug",
            Level::Success => "success",
            Level::Critical => "critical",
            Level::Alert => "alert",
            Level::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
