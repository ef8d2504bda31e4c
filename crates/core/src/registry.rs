// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource registry: the single arbitration point for ownership
//!
//! The check-then-set of every transition runs under one mutex, so two
//! clients can never both be admitted. Listeners are invoked after that lock
//! is dropped, which lets them read the registry back without deadlocking.

use crate::clock::Clock;
use crate::event::Event;
use crate::identity::{ClientId, SubscriptionId};
use crate::listener::{deliver, Listener, ListenerSet, Notified};
use crate::ownership::{Admission, Ownership, OwnershipInput};
use crate::ListenerError;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Exclusive ownership record plus its change listeners
pub struct Registry<C: Clock> {
    ownership: Mutex<Ownership>,
    listeners: Mutex<ListenerSet>,
    clock: C,
}

impl<C: Clock> Registry<C> {
    pub fn new(clock: C) -> Self {
        Self {
            ownership: Mutex::new(Ownership::Unowned),
            listeners: Mutex::new(ListenerSet::new()),
            clock,
        }
    }

    /// Attempt to become the owner
    ///
    /// Admits when unowned or already owned by `client`; otherwise reports
    /// the current owner. Listeners run only when ownership actually changed.
    pub fn register(&self, client: &ClientId) -> Notified<Admission> {
        let events = self.apply(OwnershipInput::Register {
            client: client.clone(),
        });

        let admission = match events.first() {
            Some(Event::OwnershipDenied { owner, .. }) => Admission::Denied {
                owner: owner.clone(),
            },
            _ => Admission::Admitted,
        };

        self.publish(&events, admission)
    }

    /// Give up ownership; a no-op unless `client` is the owner
    ///
    /// The outcome is true when ownership was released.
    pub fn release(&self, client: &ClientId) -> Notified<bool> {
        let events = self.apply(OwnershipInput::Release {
            client: client.clone(),
        });
        let released = !events.is_empty();
        self.publish(&events, released)
    }

    /// Clear ownership unconditionally and always notify
    ///
    /// Returns the owner that was evicted, if any.
    pub fn force_reset(&self) -> Notified<Option<ClientId>> {
        let events = self.apply(OwnershipInput::ForceReset);
        let previous = events.iter().find_map(|e| match e {
            Event::OwnershipReset { previous } => previous.clone(),
            _ => None,
        });
        self.publish(&events, previous)
    }

    pub fn current_owner(&self) -> Option<ClientId> {
        self.lock_ownership().owner().cloned()
    }

    pub fn is_owned_by(&self, client: &ClientId) -> bool {
        self.lock_ownership().is_owned_by(client)
    }

    /// How long the current owner has held the resource
    pub fn owner_held_for(&self) -> Option<Duration> {
        let since = self.lock_ownership().since()?;
        Some(self.clock.elapsed_since(since))
    }

    pub fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.lock_listeners().subscribe(listener)
    }

    /// Convenience wrapper around [`Registry::subscribe`] for plain closures
    pub fn subscribe_fn<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn() -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(f))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock_listeners().unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn apply(&self, input: OwnershipInput) -> Vec<Event> {
        let mut ownership = self.lock_ownership();
        let (next, events) = ownership.transition(input, &self.clock);
        *ownership = next;
        events
    }

    fn publish<T>(&self, events: &[Event], outcome: T) -> Notified<T> {
        for event in events {
            match event {
                Event::OwnershipDenied { .. } => tracing::debug!(event = %event, "ownership"),
                _ => tracing::info!(event = %event, "ownership"),
            }
        }

        if !events.iter().any(Event::changes_state) {
            return Notified::quiet(outcome);
        }

        let listeners = self.lock_listeners().snapshot();
        Notified {
            outcome,
            failures: deliver(&listeners),
        }
    }

    fn lock_ownership(&self) -> std::sync::MutexGuard<'_, Ownership> {
        self.ownership.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, ListenerSet> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock + Default> Default for Registry<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: Clock> std::fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("ownership", &*self.lock_ownership())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
