// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters between the arbiter and the rendering environment

pub mod probe;
pub mod traced;

pub use probe::{DriRenderNodeProbe, FixedProbe};
pub use traced::{TracedHandle, TracedProbe};
