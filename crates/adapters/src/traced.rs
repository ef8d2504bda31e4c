// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced wrappers for consistent observability of handles and probes

use rctx_core::{HandleError, HandleId, ProbeError, ResourceHandle, ResourceProbe};

/// Wrapper that adds tracing to any ResourceHandle
#[derive(Clone, Debug)]
pub struct TracedHandle<H> {
    inner: H,
}

impl<H> TracedHandle<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: ResourceHandle> ResourceHandle for TracedHandle<H> {
    fn id(&self) -> HandleId {
        self.inner.id()
    }

    fn clear_transient_state(&self) -> Result<(), HandleError> {
        let id = self.inner.id();
        let span = tracing::info_span!("handle.clear_transient_state", handle = %id);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.clear_transient_state();
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(()) => tracing::debug!(elapsed_ms, "cleared"),
            // An already-lost context is the common case here
            Err(e) => tracing::warn!(
                elapsed_ms,
                error = %e,
                "clear failed (may be expected)"
            ),
        }

        result
    }

    fn detach_presentation(&self) -> Result<(), HandleError> {
        let id = self.inner.id();
        let span = tracing::info_span!("handle.detach_presentation", handle = %id);
        let _guard = span.enter();

        let result = self.inner.detach_presentation();
        match &result {
            Ok(()) => tracing::debug!("detached"),
            Err(e) => tracing::warn!(error = %e, "detach failed"),
        }

        result
    }
}

/// Wrapper that adds tracing to any ResourceProbe
#[derive(Clone, Debug)]
pub struct TracedProbe<P> {
    inner: P,
}

impl<P> TracedProbe<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: ResourceProbe> ResourceProbe for TracedProbe<P> {
    fn sample(&self) -> Result<usize, ProbeError> {
        let start = std::time::Instant::now();
        let result = self.inner.sample();
        let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

        match &result {
            Ok(count) => tracing::trace!(count, elapsed_us, "probe.sample"),
            Err(e) => tracing::debug!(error = %e, elapsed_us, "probe.sample failed"),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
