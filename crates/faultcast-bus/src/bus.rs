//! Topic-keyed synchronous event bus
//!
//! State is a mutex-guarded map from topic name to an ordered list of
//! registrations. `publish` snapshots the registration list and invokes
//! listeners outside the lock, so concurrent subscribe/publish calls can
//! never corrupt the set mid-iteration and a listener may itself subscribe
//! without deadlocking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::errors::ListenerError;

/// Default per-topic listener cap
///
/// The cap is a leak-detection heuristic, not a protocol limit; exceeding
/// it warns and still registers.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

type Callback<T> = Arc<dyn Fn(&T) -> Result<(), ListenerError> + Send + Sync>;

struct Registration<T> {
    id: u64,
    callback: Callback<T>,
}

/// Handle returned by [`EventBus::subscribe`], used to remove the
/// registration later
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionHandle {
    topic: String,
    id: u64,
}

impl SubscriptionHandle {
    /// The topic this subscription is registered under
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

struct BusState<T> {
    topics: HashMap<String, Vec<Registration<T>>>,
    next_id: u64,
}

/// Synchronous publish/subscribe dispatcher keyed by string topic names
///
/// Generic over the payload type; listeners receive a shared reference and
/// can never mutate the publisher's value.
pub struct EventBus<T> {
    state: Mutex<BusState<T>>,
    max_listeners: usize,
}

impl<T> EventBus<T> {
    /// Create a bus with the default per-topic listener cap
    pub fn new() -> Self {
        Self::with_max_listeners(DEFAULT_MAX_LISTENERS)
    }

    /// Create a bus with an explicit per-topic listener cap
    pub fn with_max_listeners(max_listeners: usize) -> Self {
        Self {
            state: Mutex::new(BusState {
                topics: HashMap::new(),
                next_id: 0,
            }),
            max_listeners,
        }
    }

    /// The configured per-topic listener cap
    pub fn max_listeners(&self) -> usize {
        self.max_listeners
    }

    // A poisoned lock only means some caller panicked between push/clear
    // operations that each leave the map consistent, so the state is
    // still usable.
    fn lock(&self) -> MutexGuard<'_, BusState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `listener` under `topic`; invocation order equals
    /// registration order
    ///
    /// Cap policy is warn-and-allow: the registration that takes a topic
    /// past [`EventBus::max_listeners`] emits one `tracing::warn!` and is
    /// still registered.
    pub fn subscribe<F>(&self, topic: impl Into<String>, listener: F) -> SubscriptionHandle
    where
        F: Fn(&T) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        let topic = topic.into();
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;

        let registrations = state.topics.entry(topic.clone()).or_default();
        if registrations.len() >= self.max_listeners {
            tracing::warn!(
                topic = %topic,
                listeners = registrations.len() + 1,
                max_listeners = self.max_listeners,
                "listener cap exceeded; possible subscription leak"
            );
        }
        registrations.push(Registration {
            id,
            callback: Arc::new(listener),
        });

        SubscriptionHandle { topic, id }
    }

    /// Remove a single registration; returns whether it was present
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) -> bool {
        let mut state = self.lock();
        let Some(registrations) = state.topics.get_mut(&handle.topic) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|r| r.id != handle.id);
        registrations.len() != before
    }

    /// Invoke every listener currently registered for `topic`, in
    /// registration order, passing `payload`
    ///
    /// Returns whether at least one listener existed. A listener returning
    /// `Err` is logged and delivery continues with its siblings.
    pub fn publish(&self, topic: &str, payload: &T) -> bool {
        let callbacks: Vec<Callback<T>> = {
            let state = self.lock();
            match state.topics.get(topic) {
                Some(registrations) => registrations
                    .iter()
                    .map(|r| Arc::clone(&r.callback))
                    .collect(),
                None => Vec::new(),
            }
        };

        if callbacks.is_empty() {
            return false;
        }
        for callback in &callbacks {
            if let Err(err) = callback(payload) {
                tracing::warn!(
                    topic = %topic,
                    error = %err,
                    "listener failed; continuing with remaining listeners"
                );
            }
        }
        true
    }

    /// Number of listeners currently registered for `topic`
    pub fn listener_count(&self, topic: &str) -> usize {
        self.lock().topics.get(topic).map_or(0, Vec::len)
    }

    /// Remove all registrations for all topics; idempotent
    ///
    /// Publishes after `close` find no listeners and are dropped silently.
    pub fn close(&self) {
        self.lock().topics.clear();
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
