//! Fan-out option set
//!
//! Each flag names one dimension of the record that should trigger a bus
//! publish under the topic derived from that dimension's value. The fixed
//! evaluation order lives in [`crate::record::ErrorRecord::publish`].

/// Which dimensions of a record trigger a publish
///
/// `error_only` short-circuits the whole fan-out to a single publish on
/// the `"error"` topic, regardless of the other flags. `Default` sets
/// every flag false, which publishes nothing; passing no option set at
/// all to `publish` is the error-only case instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitOptions {
    pub error: bool,
    pub error_only: bool,
    pub level: bool,
    pub status: bool,
    pub exception_code: bool,
    pub specific_exception: bool,
    pub entity: bool,
    pub action: bool,
    pub system: bool,
    pub created_by: bool,
}

impl EmitOptions {
    /// Publish to the `"error"` topic only
    pub fn error_only() -> Self {
        Self {
            error_only: true,
            ..Self::default()
        }
    }

    /// Publish under every dimension the record has set
    pub fn all() -> Self {
        Self {
            error: true,
            error_only: false,
            level: true,
            status: true,
            exception_code: true,
            specific_exception: true,
            entity: true,
            action: true,
            system: true,
            created_by: true,
        }
    }
}
