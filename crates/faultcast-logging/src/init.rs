//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at application startup; further calls are no-ops. The
/// subscriber is selected by profile:
///
/// - **Development**: human-readable logs, `faultcast=debug` by default
/// - **Production**: JSON structured logs, `faultcast=info` by default
/// - **Test**: no output; pair with [`crate::init_capture`] for assertions
///
/// `RUST_LOG` overrides the default filter in both non-test profiles.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new("faultcast=debug")),
                    )
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new("faultcast=info")),
                    )
                    .init();
            }
            Profile::Test => {
                // The test subscriber is installed by init_capture();
                // installing one here too would collide with it.
            }
        }
    });
}
