// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for arbitration, handle cleanup and probing

use crate::identity::{ClientId, HandleId};
use thiserror::Error;

/// Errors surfaced by the arbiter to its callers
#[derive(Debug, Error)]
pub enum ArbiterError {
    #[error("ownership denied to {requested}: held by {owner}")]
    OwnershipDenied { requested: ClientId, owner: ClientId },
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// A handle failed one of its release steps
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandleError {
    #[error("handle is no longer valid: {0}")]
    Invalid(String),
    #[error("release failed: {0}")]
    ReleaseFailed(String),
    #[error("release panicked: {0}")]
    Panicked(String),
}

/// Step of the per-handle release routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupStage {
    ClearTransientState,
    DetachPresentation,
}

impl std::fmt::Display for CleanupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanupStage::ClearTransientState => write!(f, "clear_transient_state"),
            CleanupStage::DetachPresentation => write!(f, "detach_presentation"),
        }
    }
}

/// One handle's failure during cleanup; logged and reported, never propagated
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cleanup of handle {handle} failed at {stage}: {error}")]
pub struct HandleCleanupFailure {
    pub handle: HandleId,
    pub stage: CleanupStage,
    #[source]
    pub error: HandleError,
}

/// The ambient resource probe could not produce a sample
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe unavailable: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A listener reported failure while being notified
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListenerError {
    #[error("listener failed: {0}")]
    Failed(String),
    #[error("listener panicked: {0}")]
    Panicked(String),
}

/// Configuration could not be loaded or is invalid
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
