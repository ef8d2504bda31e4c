// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events emitted by ownership transitions

use crate::identity::ClientId;
use serde::{Deserialize, Serialize};

/// Record of what an ownership transition did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    OwnershipAdmitted {
        owner: ClientId,
    },
    OwnershipDenied {
        requested: ClientId,
        owner: ClientId,
    },
    OwnershipReleased {
        owner: ClientId,
    },
    /// Forced reset; `previous` is `None` when nothing was held
    OwnershipReset {
        previous: Option<ClientId>,
    },
}

impl Event {
    /// Stable event name for logs and pattern matching
    pub fn name(&self) -> &'static str {
        match self {
            Event::OwnershipAdmitted { .. } => "ownership:admitted",
            Event::OwnershipDenied { .. } => "ownership:denied",
            Event::OwnershipReleased { .. } => "ownership:released",
            Event::OwnershipReset { .. } => "ownership:reset",
        }
    }

    /// Whether this event reflects a change to the ownership record
    ///
    /// Listeners are notified only for state-changing events.
    pub fn changes_state(&self) -> bool {
        !matches!(self, Event::OwnershipDenied { .. })
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::OwnershipAdmitted { owner } => write!(f, "{} owner={}", self.name(), owner),
            Event::OwnershipDenied { requested, owner } => {
                write!(f, "{} requested={} owner={}", self.name(), requested, owner)
            }
            Event::OwnershipReleased { owner } => write!(f, "{} owner={}", self.name(), owner),
            Event::OwnershipReset { previous: Some(p) } => {
                write!(f, "{} previous={}", self.name(), p)
            }
            Event::OwnershipReset { previous: None } => write!(f, "{}", self.name()),
        }
    }
}
