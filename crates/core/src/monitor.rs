// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Passive usage monitor
//!
//! Periodically samples how many rendering resources are alive in the
//! environment and warns when the count exceeds the configured maximum. The
//! monitor never touches ownership or listeners.

use crate::error::ProbeError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest interval `spawn` will sample at
pub const MIN_SAMPLE_INTERVAL: Duration = Duration::from_millis(1);

/// Source of the ambient resource count
pub trait ResourceProbe: Send + Sync + 'static {
    fn sample(&self) -> Result<usize, ProbeError>;
}

impl<P: ResourceProbe + ?Sized> ResourceProbe for Arc<P> {
    fn sample(&self) -> Result<usize, ProbeError> {
        (**self).sample()
    }
}

impl ResourceProbe for Box<dyn ResourceProbe> {
    fn sample(&self) -> Result<usize, ProbeError> {
        (**self).sample()
    }
}

/// Ambient count exceeded the configured maximum (advisory only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSaturationWarning {
    pub observed: usize,
    pub max: usize,
    pub observed_at: DateTime<Utc>,
}

impl std::fmt::Display for ResourceSaturationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} live rendering resources exceed the limit of {}",
            self.observed, self.max
        )
    }
}

/// Most recent successful sample, shared with diagnostics
#[derive(Debug, Clone, Default)]
pub struct SampleCell(Arc<Mutex<Option<usize>>>);

impl SampleCell {
    pub fn get(&self) -> Option<usize> {
        *self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set(&self, count: usize) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = Some(count);
    }
}

/// Samples a probe and compares the result with a maximum
pub struct UsageMonitor<P: ResourceProbe> {
    probe: P,
    max_resources: usize,
    last_sample: SampleCell,
}

impl<P: ResourceProbe> UsageMonitor<P> {
    pub fn new(probe: P, max_resources: usize) -> Self {
        Self {
            probe,
            max_resources,
            last_sample: SampleCell::default(),
        }
    }

    /// Publish samples into an existing cell instead of a private one
    pub fn with_sample_cell(mut self, cell: SampleCell) -> Self {
        self.last_sample = cell;
        self
    }

    pub fn last_sample(&self) -> &SampleCell {
        &self.last_sample
    }

    /// Take one sample
    ///
    /// Returns the warning when the count is over the limit. A failed probe is
    /// logged and leaves the previous sample in place.
    pub fn tick(&self) -> Option<ResourceSaturationWarning> {
        let observed = match self.probe.sample() {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(error = %e, "resource probe failed");
                return None;
            }
        };
        self.last_sample.set(observed);

        if observed <= self.max_resources {
            tracing::trace!(observed, max = self.max_resources, "resource usage sampled");
            return None;
        }

        let warning = ResourceSaturationWarning {
            observed,
            max: self.max_resources,
            observed_at: Utc::now(),
        };
        tracing::warn!(
            observed,
            max = self.max_resources,
            "{}",
            warning
        );
        Some(warning)
    }

    /// Run `tick` every `interval` on the current tokio runtime
    ///
    /// The first sample is taken one full interval after spawning. Intervals
    /// below [`MIN_SAMPLE_INTERVAL`] are raised to it. Probes may block, so
    /// each sample runs on the blocking pool.
    pub fn spawn(self, interval: Duration) -> MonitorHandle {
        let interval = interval.max(MIN_SAMPLE_INTERVAL);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let monitor = Arc::new(self);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Skip initial immediate tick
            ticker.tick().await;

            tracing::debug!(
                interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
                "usage monitor started"
            );
            loop {
                tokio::select! {
                    biased;
                    // Fires on shutdown and when the handle is dropped
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        let monitor = Arc::clone(&monitor);
                        if let Err(e) = tokio::task::spawn_blocking(move || monitor.tick()).await {
                            tracing::warn!(error = %e, "resource sample failed");
                        }
                    }
                }
            }
            tracing::debug!("usage monitor stopped");
        });

        MonitorHandle {
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }
}

/// Owner of a running monitor task
///
/// Dropping the handle aborts the task; prefer [`MonitorHandle::shutdown`]
/// to wait for it to exit.
pub struct MonitorHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Stop sampling and wait for the task to exit
    ///
    /// No sample is taken after this returns.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "usage monitor task failed");
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
