//! Core types shared across faultcast crates
//!
//! This crate provides the foundational types used by both the error-record
//! and event-bus facilities:
//!
//! - **Correlation**: `CorrelationId`, the per-occurrence identifier carried
//!   by every error record
//! - **Schema constants**: the canonical topic name, environment variable,
//!   serialized-payload keys and tracing field names

pub mod correlation;
pub mod schema;

pub use correlation::CorrelationId;
