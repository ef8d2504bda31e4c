// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake handles and probes for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::cleanup::ResourceHandle;
use crate::error::{CleanupStage, HandleError, ProbeError};
use crate::identity::HandleId;
use crate::monitor::ResourceProbe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Recorded handle call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleCall {
    ClearTransientState { id: HandleId },
    DetachPresentation { id: HandleId },
}

/// Call log shared between several fake handles, so ordering across
/// handles can be asserted
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<HandleCall>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HandleCall> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Ids whose transient state was cleared, in call order
    pub fn cleared(&self) -> Vec<HandleId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HandleCall::ClearTransientState { id } => Some(id),
                HandleCall::DetachPresentation { .. } => None,
            })
            .collect()
    }

    fn push(&self, call: HandleCall) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

/// Fake resource handle with injectable failures
#[derive(Debug, Clone)]
pub struct FakeHandle {
    id: HandleId,
    log: CallLog,
    fail_at: Arc<Mutex<Option<CleanupStage>>>,
    panic_at: Arc<Mutex<Option<CleanupStage>>>,
}

impl FakeHandle {
    pub fn new(id: impl Into<String>, log: &CallLog) -> Self {
        Self {
            id: HandleId::new(id),
            log: log.clone(),
            fail_at: Arc::new(Mutex::new(None)),
            panic_at: Arc::new(Mutex::new(None)),
        }
    }

    /// Make the given release step fail as if the resource were already gone
    pub fn fail_at(&self, stage: CleanupStage) {
        *self.fail_at.lock().unwrap_or_else(|e| e.into_inner()) = Some(stage);
    }

    /// Make the given release step panic, as a buggy driver binding would
    pub fn panic_at(&self, stage: CleanupStage) {
        *self.panic_at.lock().unwrap_or_else(|e| e.into_inner()) = Some(stage);
    }

    pub fn into_arc(self) -> Arc<dyn ResourceHandle> {
        Arc::new(self)
    }

    #[allow(clippy::panic)]
    fn outcome(&self, stage: CleanupStage) -> Result<(), HandleError> {
        if *self.panic_at.lock().unwrap_or_else(|e| e.into_inner()) == Some(stage) {
            panic!("{} crashed during {}", self.id, stage);
        }
        if *self.fail_at.lock().unwrap_or_else(|e| e.into_inner()) == Some(stage) {
            return Err(HandleError::Invalid(format!("{} already lost", self.id)));
        }
        Ok(())
    }
}

impl ResourceHandle for FakeHandle {
    fn id(&self) -> HandleId {
        self.id.clone()
    }

    fn clear_transient_state(&self) -> Result<(), HandleError> {
        self.log.push(HandleCall::ClearTransientState {
            id: self.id.clone(),
        });
        self.outcome(CleanupStage::ClearTransientState)
    }

    fn detach_presentation(&self) -> Result<(), HandleError> {
        self.log.push(HandleCall::DetachPresentation {
            id: self.id.clone(),
        });
        self.outcome(CleanupStage::DetachPresentation)
    }
}

/// Fake probe with a settable count
#[derive(Debug, Clone, Default)]
pub struct FakeProbe {
    count: Arc<AtomicUsize>,
    samples: Arc<AtomicUsize>,
    unavailable: Arc<Mutex<bool>>,
}

impl FakeProbe {
    pub fn new(count: usize) -> Self {
        let probe = Self::default();
        probe.set(count);
        probe
    }

    pub fn set(&self, count: usize) {
        self.count.store(count, Ordering::SeqCst);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap_or_else(|e| e.into_inner()) = unavailable;
    }

    /// Number of times the probe has been sampled
    pub fn samples(&self) -> usize {
        self.samples.load(Ordering::SeqCst)
    }
}

impl ResourceProbe for FakeProbe {
    fn sample(&self) -> Result<usize, ProbeError> {
        self.samples.fetch_add(1, Ordering::SeqCst);
        if *self.unavailable.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(ProbeError::Unavailable("fake probe offline".into()));
        }
        Ok(self.count.load(Ordering::SeqCst))
    }
}
