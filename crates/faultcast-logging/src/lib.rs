//! Logging facility for faultcast
//!
//! The library reports its own diagnostics (listener-cap warnings,
//! listener failures) through `tracing`; this crate owns the subscriber
//! side of that contract:
//!
//! - Single initialization point via `init(profile)`
//! - Development / Production / Test profiles
//! - In-memory capture mode so tests can assert on emitted diagnostics

pub mod capture;
pub mod init;

pub use capture::{init_capture, CaptureHandle, CapturedEvent};
pub use init::{init, Profile};
