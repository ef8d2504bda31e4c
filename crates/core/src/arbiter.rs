// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level arbitration context
//!
//! One [`Arbiter`] is constructed by the application and passed by reference
//! to every consumer. It wires the registry, the cleanup coordinator and the
//! usage monitor together according to an [`ArbiterConfig`].

use crate::cleanup::{CleanupCoordinator, CleanupOptions, CleanupReport, ResourceHandle};
use crate::clock::{Clock, SystemClock};
use crate::config::ArbiterConfig;
use crate::error::ArbiterError;
use crate::identity::{ClientId, HandleId, SubscriptionId};
use crate::listener::{Listener, ListenerFailure, Notified};
use crate::monitor::{MonitorHandle, ResourceProbe, ResourceSaturationWarning, SampleCell, UsageMonitor};
use crate::ownership::Admission;
use crate::registry::Registry;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Point-in-time view of the arbiter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub active_handle_count: usize,
    pub listener_count: usize,
    pub is_owner_active: bool,
    /// Last count seen by the usage monitor; `None` before the first sample
    pub ambient_resource_count: Option<usize>,
    pub owner: Option<ClientId>,
    #[serde(with = "humantime_serde")]
    pub owner_held_for: Option<Duration>,
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.owner {
            Some(owner) => writeln!(f, "owner:     {}", owner)?,
            None => writeln!(f, "owner:     (none)")?,
        }
        if let Some(held) = self.owner_held_for {
            writeln!(f, "held for:  {}", humantime::format_duration(held))?;
        }
        writeln!(f, "handles:   {}", self.active_handle_count)?;
        writeln!(f, "listeners: {}", self.listener_count)?;
        match self.ambient_resource_count {
            Some(count) => write!(f, "ambient:   {}", count),
            None => write!(f, "ambient:   (not sampled)"),
        }
    }
}

/// Exclusive resource arbitration service
pub struct Arbiter<C: Clock = SystemClock> {
    config: ArbiterConfig,
    registry: Registry<C>,
    coordinator: CleanupCoordinator,
    probe: Arc<dyn ResourceProbe>,
    ambient: SampleCell,
}

impl Arbiter<SystemClock> {
    pub fn new(config: ArbiterConfig, probe: impl ResourceProbe) -> Result<Self, ArbiterError> {
        Self::with_clock(config, probe, SystemClock)
    }
}

impl<C: Clock> Arbiter<C> {
    pub fn with_clock(
        config: ArbiterConfig,
        probe: impl ResourceProbe,
        clock: C,
    ) -> Result<Self, ArbiterError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: Registry::new(clock),
            coordinator: CleanupCoordinator::new(),
            probe: Arc::new(probe),
            ambient: SampleCell::default(),
        })
    }

    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    // === Ownership ===

    pub fn register(&self, client: &ClientId) -> Notified<Admission> {
        self.registry.register(client)
    }

    pub fn release(&self, client: &ClientId) -> Notified<bool> {
        self.registry.release(client)
    }

    pub fn force_reset(&self) -> Notified<Option<ClientId>> {
        let result = self.registry.force_reset();
        if let Some(previous) = &result.outcome {
            tracing::warn!(previous = %previous, "ownership forcibly reset");
        }
        result
    }

    pub fn current_owner(&self) -> Option<ClientId> {
        self.registry.current_owner()
    }

    /// Register `client` and return a lease that detaches it on drop
    ///
    /// Attaching an identity that already owns the resource succeeds again;
    /// the first lease of that identity to detach releases ownership.
    /// Listeners that failed on admission are kept on the lease.
    pub fn attach(&self, client: ClientId) -> Result<Lease<'_, C>, ArbiterError> {
        let Notified { outcome, failures } = self.registry.register(&client);
        outcome.into_result(&client)?;
        Ok(Lease {
            arbiter: self,
            client,
            listener_failures: failures,
            detached: false,
        })
    }

    // === Listeners ===

    pub fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.registry.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry.unsubscribe(id)
    }

    // === Handles ===

    pub fn register_handle(&self, handle: Arc<dyn ResourceHandle>) -> bool {
        self.coordinator.register_handle(handle)
    }

    pub fn unregister_handle(&self, id: &HandleId) -> bool {
        self.coordinator.unregister_handle(id)
    }

    pub fn cleanup(&self, options: CleanupOptions) -> CleanupReport {
        self.coordinator.cleanup(options)
    }

    /// Cleanup using the configured preserve policy
    pub fn cleanup_default(&self) -> CleanupReport {
        self.cleanup(CleanupOptions {
            preserve_last: self.config.preserve_active_resource,
        })
    }

    // === Monitoring ===

    /// Take one ambient sample immediately
    pub fn sample_now(&self) -> Option<ResourceSaturationWarning> {
        self.monitor().tick()
    }

    /// Spawn the periodic usage monitor on the current tokio runtime
    pub fn start_monitor(&self) -> MonitorHandle {
        self.monitor().spawn(self.config.sample_interval)
    }

    pub fn snapshot(&self) -> Diagnostics {
        let owner = self.registry.current_owner();
        Diagnostics {
            active_handle_count: self.coordinator.handle_count(),
            listener_count: self.registry.listener_count(),
            is_owner_active: owner.is_some(),
            ambient_resource_count: self.ambient.get(),
            owner_held_for: owner.as_ref().and(self.registry.owner_held_for()),
            owner,
        }
    }

    fn monitor(&self) -> UsageMonitor<Arc<dyn ResourceProbe>> {
        UsageMonitor::new(Arc::clone(&self.probe), self.config.max_resources)
            .with_sample_cell(self.ambient.clone())
    }
}

impl<C: Clock> std::fmt::Debug for Arbiter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arbiter")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("coordinator", &self.coordinator)
            .finish()
    }
}

/// What detaching a lease did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detachment {
    pub released: Notified<bool>,
    /// Present when auto cleanup ran
    pub cleanup: Option<CleanupReport>,
}

/// An attached client; detaches on drop
#[must_use = "dropping a lease immediately releases ownership"]
pub struct Lease<'a, C: Clock = SystemClock> {
    arbiter: &'a Arbiter<C>,
    client: ClientId,
    listener_failures: Vec<ListenerFailure>,
    detached: bool,
}

impl<C: Clock> Lease<'_, C> {
    pub fn client(&self) -> &ClientId {
        &self.client
    }

    /// Listeners that failed while being told about this admission
    pub fn listener_failures(&self) -> &[ListenerFailure] {
        &self.listener_failures
    }

    /// Detach explicitly and see what happened
    pub fn detach(mut self) -> Detachment {
        self.detach_inner()
    }

    fn detach_inner(&mut self) -> Detachment {
        self.detached = true;

        let cleanup = self
            .arbiter
            .config
            .auto_cleanup
            .then(|| self.arbiter.cleanup_default());
        let released = self.arbiter.release(&self.client);

        tracing::debug!(
            client = %self.client,
            released = released.outcome,
            cleaned = cleanup.as_ref().map(|r| r.released.len()),
            "lease detached"
        );
        Detachment { released, cleanup }
    }
}

impl<C: Clock> Drop for Lease<'_, C> {
    fn drop(&mut self) {
        if !self.detached {
            self.detach_inner();
        }
    }
}

impl<C: Clock> std::fmt::Debug for Lease<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lease")
            .field("client", &self.client)
            .field("listener_failures", &self.listener_failures)
            .finish()
    }
}

#[cfg(test)]
#[path = "arbiter_tests.rs"]
mod tests;
