// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cleanup coordinator for abandoned resource handles
//!
//! Handles are kept in registration order. Cleanup releases them
//! oldest-to-newest and can keep the most recently registered one alive.
//! Release is best-effort: a handle that fails or panics is logged and
//! skipped, and the remaining handles are still released.

use crate::error::{CleanupStage, HandleCleanupFailure, HandleError};
use crate::identity::HandleId;
use crate::listener::panic_message;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

/// An expensive external resource that must be released explicitly
pub trait ResourceHandle: Send + Sync {
    fn id(&self) -> HandleId;

    /// Drop transient state held by the resource (e.g. lose the GPU context)
    fn clear_transient_state(&self) -> Result<(), HandleError>;

    /// Detach any external presentation element the resource is attached to
    fn detach_presentation(&self) -> Result<(), HandleError>;
}

/// Options for a cleanup pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Keep the most recently registered handle
    pub preserve_last: bool,
}

impl CleanupOptions {
    pub fn preserve_last() -> Self {
        Self {
            preserve_last: true,
        }
    }

    pub fn release_all() -> Self {
        Self {
            preserve_last: false,
        }
    }
}

/// What a cleanup pass did
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Handles removed, in the order their release routine ran
    pub released: Vec<HandleId>,
    pub preserved: Option<HandleId>,
    pub failures: Vec<HandleCleanupFailure>,
}

/// Owns the handle collection; the only writer of it
#[derive(Default)]
pub struct CleanupCoordinator {
    handles: Mutex<Vec<Arc<dyn ResourceHandle>>>,
}

impl CleanupCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a handle; false if a handle with the same id is already tracked
    pub fn register_handle(&self, handle: Arc<dyn ResourceHandle>) -> bool {
        let id = handle.id();
        let mut handles = self.lock();
        if handles.iter().any(|h| h.id() == id) {
            return false;
        }
        tracing::debug!(handle = %id, "handle registered");
        handles.push(handle);
        true
    }

    /// Stop tracking a handle without releasing it; false if it was absent
    pub fn unregister_handle(&self, id: &HandleId) -> bool {
        let mut handles = self.lock();
        let before = handles.len();
        handles.retain(|h| &h.id() != id);
        let removed = handles.len() != before;
        if removed {
            tracing::debug!(handle = %id, "handle unregistered");
        }
        removed
    }

    pub fn handle_count(&self) -> usize {
        self.lock().len()
    }

    /// Tracked handle ids, oldest first
    pub fn handle_ids(&self) -> Vec<HandleId> {
        self.lock().iter().map(|h| h.id()).collect()
    }

    /// Release tracked handles oldest-to-newest
    ///
    /// The collection is trimmed before any release routine runs, so a
    /// handle may call back into the coordinator while it is being released.
    pub fn cleanup(&self, options: CleanupOptions) -> CleanupReport {
        let (to_release, preserved) = {
            let mut handles = self.lock();
            let mut drained: Vec<_> = handles.drain(..).collect();
            let preserved = if options.preserve_last {
                drained.pop()
            } else {
                None
            };
            if let Some(keep) = &preserved {
                handles.push(Arc::clone(keep));
            }
            (drained, preserved.map(|h| h.id()))
        };

        let span = tracing::info_span!(
            "cleanup",
            handles = to_release.len(),
            preserve_last = options.preserve_last
        );
        let _guard = span.enter();

        let mut report = CleanupReport {
            preserved,
            ..CleanupReport::default()
        };

        for handle in to_release {
            let id = handle.id();
            let results = [
                (
                    CleanupStage::ClearTransientState,
                    run_stage(|| handle.clear_transient_state()),
                ),
                (
                    CleanupStage::DetachPresentation,
                    run_stage(|| handle.detach_presentation()),
                ),
            ];

            for (stage, result) in results {
                if let Err(error) = result {
                    let failure = HandleCleanupFailure {
                        handle: id.clone(),
                        stage,
                        error,
                    };
                    tracing::warn!(error = %failure, "handle cleanup failed");
                    report.failures.push(failure);
                }
            }

            report.released.push(id);
        }

        tracing::debug!(
            released = report.released.len(),
            failures = report.failures.len(),
            "cleanup finished"
        );
        report
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn ResourceHandle>>> {
        self.handles.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Run one release step, turning a panic into [`HandleError::Panicked`]
fn run_stage(step: impl FnOnce() -> Result<(), HandleError>) -> Result<(), HandleError> {
    catch_unwind(AssertUnwindSafe(step))
        .unwrap_or_else(|payload| Err(HandleError::Panicked(panic_message(payload.as_ref()))))
}

impl std::fmt::Debug for CleanupCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupCoordinator")
            .field("handles", &self.handle_ids())
            .finish()
    }
}

#[cfg(test)]
#[path = "cleanup_tests.rs"]
mod tests;
