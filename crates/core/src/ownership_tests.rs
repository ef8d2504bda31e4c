// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use std::time::Duration;
use yare::parameterized;

fn register(client: &str) -> OwnershipInput {
    OwnershipInput::Register {
        client: ClientId::new(client),
    }
}

fn release(client: &str) -> OwnershipInput {
    OwnershipInput::Release {
        client: ClientId::new(client),
    }
}

fn owned_by(client: &str, clock: &FakeClock) -> Ownership {
    let (ownership, _) = Ownership::Unowned.transition(register(client), clock);
    ownership
}

#[test]
fn register_when_unowned_admits() {
    let clock = FakeClock::new();

    let (next, events) = Ownership::Unowned.transition(register("viewer"), &clock);

    assert!(next.is_owned_by(&ClientId::new("viewer")));
    assert_eq!(next.since(), Some(clock.now()));
    assert_eq!(
        events,
        vec![Event::OwnershipAdmitted {
            owner: ClientId::new("viewer")
        }]
    );
}

#[test]
fn reregister_by_owner_is_silent_noop() {
    let clock = FakeClock::new();
    let ownership = owned_by("viewer", &clock);
    clock.advance(Duration::from_secs(10));

    let (next, events) = ownership.transition(register("viewer"), &clock);

    assert_eq!(next, ownership);
    assert!(events.is_empty());
}

#[test]
fn register_by_other_is_denied_with_current_owner() {
    let clock = FakeClock::new();
    let ownership = owned_by("a", &clock);

    let (next, events) = ownership.transition(register("b"), &clock);

    assert!(next.is_owned_by(&ClientId::new("a")));
    assert_eq!(
        events,
        vec![Event::OwnershipDenied {
            requested: ClientId::new("b"),
            owner: ClientId::new("a"),
        }]
    );
}

#[test]
fn release_by_owner_clears() {
    let clock = FakeClock::new();
    let ownership = owned_by("a", &clock);

    let (next, events) = ownership.transition(release("a"), &clock);

    assert!(next.is_unowned());
    assert_eq!(
        events,
        vec![Event::OwnershipReleased {
            owner: ClientId::new("a")
        }]
    );
}

#[parameterized(
    non_owner = { Some("a"), "b" },
    already_unowned = { None, "a" },
)]
fn release_without_ownership_is_noop(holder: Option<&str>, releaser: &str) {
    let clock = FakeClock::new();
    let ownership = match holder {
        Some(h) => owned_by(h, &clock),
        None => Ownership::Unowned,
    };

    let (next, events) = ownership.transition(release(releaser), &clock);

    assert_eq!(next, ownership);
    assert!(events.is_empty());
}

#[parameterized(
    from_owned = { Some("a") },
    from_unowned = { None },
)]
fn force_reset_always_clears_and_reports(holder: Option<&str>) {
    let clock = FakeClock::new();
    let ownership = match holder {
        Some(h) => owned_by(h, &clock),
        None => Ownership::Unowned,
    };

    let (next, events) = ownership.transition(OwnershipInput::ForceReset, &clock);

    assert!(next.is_unowned());
    assert_eq!(
        events,
        vec![Event::OwnershipReset {
            previous: holder.map(ClientId::new)
        }]
    );
}

#[test]
fn admission_into_result() {
    let requested = ClientId::new("b");
    assert!(Admission::Admitted.into_result(&requested).is_ok());

    let err = Admission::Denied {
        owner: ClientId::new("a"),
    }
    .into_result(&requested)
    .unwrap_err();
    assert!(matches!(
        err,
        crate::ArbiterError::OwnershipDenied { ref requested, ref owner }
        if requested.as_str() == "b" && owner.as_str() == "a"
    ));
}

use proptest::prelude::*;

fn arb_input() -> impl Strategy<Value = OwnershipInput> {
    let client = prop::sample::select(vec!["a", "b", "c"]);
    prop_oneof![
        client.clone().prop_map(register),
        client.prop_map(release),
        Just(OwnershipInput::ForceReset),
    ]
}

proptest! {
    #[test]
    fn events_agree_with_record_changes(inputs in proptest::collection::vec(arb_input(), 1..40)) {
        let clock = FakeClock::new();
        let mut ownership = Ownership::Unowned;

        for input in inputs {
            let is_reset = matches!(input, OwnershipInput::ForceReset);
            let (next, events) = ownership.transition(input, &clock);

            let changed = next != ownership;
            let reported_change = events.iter().any(Event::changes_state);

            // Reset always reports; everything else reports exactly when the record moves
            if is_reset {
                prop_assert!(reported_change);
                prop_assert!(next.is_unowned());
            } else {
                prop_assert_eq!(changed, reported_change);
            }
            prop_assert!(events.len() <= 1);

            ownership = next;
            clock.advance(Duration::from_millis(1));
        }
    }
}
