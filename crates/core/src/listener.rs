// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ownership-change listeners
//!
//! Listeners are zero-argument callbacks keyed by an opaque
//! [`SubscriptionId`]. Delivery is synchronous and in subscription order; a
//! failing or panicking listener never stops the ones after it.

use crate::error::ListenerError;
use crate::identity::SubscriptionId;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Callback invoked on every ownership state change
pub type Listener = Arc<dyn Fn() -> Result<(), ListenerError> + Send + Sync>;

/// A listener that failed during one notification round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    pub subscription: SubscriptionId,
    pub error: ListenerError,
}

/// Result of a mutating call together with any listener failures it caused
///
/// Failures never roll back the mutation that triggered them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notified<T> {
    pub outcome: T,
    pub failures: Vec<ListenerFailure>,
}

impl<T> Notified<T> {
    pub(crate) fn quiet(outcome: T) -> Self {
        Self {
            outcome,
            failures: Vec::new(),
        }
    }

    /// True when every notified listener succeeded (or none ran)
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_outcome(self) -> T {
        self.outcome
    }
}

/// Ordered set of subscriptions
#[derive(Default)]
pub struct ListenerSet {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener, returning its token
    ///
    /// Subscribing the same `Arc` twice returns the existing token instead of
    /// adding a second entry.
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        if let Some((id, _)) = self
            .entries
            .iter()
            .find(|(_, existing)| Arc::ptr_eq(existing, &listener))
        {
            return *id;
        }

        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    /// Remove exactly the subscription behind `id`; false if it was not present
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the current subscriptions, for delivery outside any lock
    pub fn snapshot(&self) -> Vec<(SubscriptionId, Listener)> {
        self.entries.clone()
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("subscriptions", &self.entries.iter().map(|(id, _)| *id).collect::<Vec<_>>())
            .finish()
    }
}

/// Invoke every listener in order, collecting failures
pub fn deliver(listeners: &[(SubscriptionId, Listener)]) -> Vec<ListenerFailure> {
    let mut failures = Vec::new();

    for (id, listener) in listeners {
        let result = match catch_unwind(AssertUnwindSafe(|| listener())) {
            Ok(result) => result,
            Err(payload) => Err(ListenerError::Panicked(panic_message(payload.as_ref()))),
        };

        if let Err(error) = result {
            tracing::warn!(subscription = %id, error = %error, "listener failed");
            failures.push(ListenerFailure {
                subscription: *id,
                error,
            });
        }
    }

    failures
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
