// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! rctx-core: exclusive arbitration of scarce rendering resources
//!
//! This crate provides:
//! - A pure ownership state machine and the locked registry around it
//! - Ordered, fault-tolerant ownership-change listeners
//! - Best-effort cleanup of abandoned resource handles
//! - A passive, cancellable usage monitor
//! - The [`Arbiter`] context that ties them together

pub mod arbiter;
pub mod cleanup;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod identity;
pub mod listener;
pub mod monitor;
pub mod ownership;
pub mod registry;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use arbiter::{Arbiter, Detachment, Diagnostics, Lease};
pub use cleanup::{CleanupCoordinator, CleanupOptions, CleanupReport, ResourceHandle};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::ArbiterConfig;
pub use error::{
    ArbiterError, CleanupStage, ConfigError, HandleCleanupFailure, HandleError, ListenerError,
    ProbeError,
};
pub use event::Event;
pub use identity::{ClientId, HandleId, SubscriptionId};
pub use listener::{Listener, ListenerFailure, ListenerSet, Notified};
pub use monitor::{
    MonitorHandle, ResourceProbe, ResourceSaturationWarning, SampleCell, UsageMonitor,
    MIN_SAMPLE_INTERVAL,
};
pub use ownership::{Admission, Ownership, OwnershipInput};
pub use registry::Registry;
