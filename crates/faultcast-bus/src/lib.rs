//! Faultcast event bus - synchronous topic-keyed publish/subscribe
//!
//! A small in-process dispatcher: listeners register under arbitrary string
//! topics and are invoked synchronously, in registration order, whenever a
//! payload is published to their topic. No queueing, no persistence, no
//! cross-process delivery.
//!
//! The bus is an explicitly constructed value, injected into whatever
//! produces events; there is no ambient global instance. A configurable
//! per-topic listener cap (default 10) flags registration leaks, and a
//! failing listener never prevents delivery to its siblings.

pub mod bus;
pub mod errors;

pub use bus::{EventBus, SubscriptionHandle, DEFAULT_MAX_LISTENERS};
pub use errors::ListenerError;
