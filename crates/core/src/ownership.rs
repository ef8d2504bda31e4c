// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ownership state machine for the exclusive resource
//!
//! Pure transitions: the caller supplies the input and a clock, and gets back
//! the next record plus the events describing what happened. Locking and
//! listener delivery live in [`crate::registry`].

use crate::clock::Clock;
use crate::event::Event;
use crate::identity::ClientId;
use std::time::Instant;

/// The single ownership record
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Ownership {
    #[default]
    Unowned,
    Owned {
        owner: ClientId,
        /// When the current owner was admitted
        since: Instant,
    },
}

/// Inputs that drive ownership transitions
#[derive(Clone, Debug)]
pub enum OwnershipInput {
    Register { client: ClientId },
    Release { client: ClientId },
    ForceReset,
}

/// Outcome of a registration attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Denied { owner: ClientId },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }

    /// Convert a denial into [`ArbiterError::OwnershipDenied`](crate::ArbiterError)
    pub fn into_result(self, requested: &ClientId) -> Result<(), crate::ArbiterError> {
        match self {
            Admission::Admitted => Ok(()),
            Admission::Denied { owner } => Err(crate::ArbiterError::OwnershipDenied {
                requested: requested.clone(),
                owner,
            }),
        }
    }
}

impl Ownership {
    pub fn owner(&self) -> Option<&ClientId> {
        match self {
            Ownership::Unowned => None,
            Ownership::Owned { owner, .. } => Some(owner),
        }
    }

    pub fn is_owned_by(&self, client: &ClientId) -> bool {
        matches!(self, Ownership::Owned { owner, .. } if owner == client)
    }

    pub fn is_unowned(&self) -> bool {
        matches!(self, Ownership::Unowned)
    }

    /// Instant the current owner was admitted
    pub fn since(&self) -> Option<Instant> {
        match self {
            Ownership::Unowned => None,
            Ownership::Owned { since, .. } => Some(*since),
        }
    }

    /// Pure state transition function
    pub fn transition(&self, input: OwnershipInput, clock: &impl Clock) -> (Ownership, Vec<Event>) {
        let mut next = self.clone();
        let mut events = Vec::new();

        match input {
            OwnershipInput::Register { client } => match self {
                Ownership::Unowned => {
                    next = Ownership::Owned {
                        owner: client.clone(),
                        since: clock.now(),
                    };
                    events.push(Event::OwnershipAdmitted { owner: client });
                }
                Ownership::Owned { owner, .. } if owner == &client => {
                    // Idempotent re-admit: no change, nothing to report
                }
                Ownership::Owned { owner, .. } => {
                    events.push(Event::OwnershipDenied {
                        requested: client,
                        owner: owner.clone(),
                    });
                }
            },

            OwnershipInput::Release { client } => {
                if self.is_owned_by(&client) {
                    next = Ownership::Unowned;
                    events.push(Event::OwnershipReleased { owner: client });
                }
            }

            OwnershipInput::ForceReset => {
                next = Ownership::Unowned;
                events.push(Event::OwnershipReset {
                    previous: self.owner().cloned(),
                });
            }
        }

        (next, events)
    }
}

#[cfg(test)]
#[path = "ownership_tests.rs"]
mod tests;
