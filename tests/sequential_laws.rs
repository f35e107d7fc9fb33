//! Property-based tests for the sequential combinators.
//!
//! This module verifies that:
//!
//! - **Agreement**: the asynchronous combinators agree with their
//!   synchronous counterparts, whether steps resume now or later
//! - **Halting**: a failure at index `k` leaves mapped values before `k`,
//!   the failing step's value at `k`, and original values after `k`
//! - **Shape**: mapping targets keep their keys

#![cfg(feature = "combinator")]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use functools::combinator::{Halted, Slot, filter, filter_async, fold, fold_async, map, map_async};
use functools::control::{Continuation, Schedule, Scheduler};
use proptest::prelude::*;

type MapOutcome = Result<Vec<i64>, Halted<String, Vec<Slot<i64, i64>>>>;

fn run_map(values: Vec<i64>, deferred: bool) -> Option<MapOutcome> {
    let scheduler = Scheduler::new();
    let handle = scheduler.clone();
    let result = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&result);

    map_async(
        move |value: i64, continuation: Continuation<i64, String>| {
            if deferred {
                handle.defer(Box::new(move || continuation.succeed(value.wrapping_mul(3))));
            } else {
                continuation.succeed(value.wrapping_mul(3));
            }
        },
        values,
        move |outcome| *sink.borrow_mut() = Some(outcome),
    );

    scheduler.run_until_idle();
    result.borrow_mut().take()
}

// =============================================================================
// Agreement
// =============================================================================

proptest! {
    #[test]
    fn prop_map_async_agrees_with_map(
        values in prop::collection::vec(any::<i64>(), 0..64),
        deferred in any::<bool>(),
    ) {
        let expected = map(
            |value: &i64, _: &usize, _: &[(usize, i64)]| value.wrapping_mul(3),
            values.clone(),
        );
        prop_assert_eq!(run_map(values, deferred), Some(Ok(expected)));
    }

    #[test]
    fn prop_filter_async_agrees_with_filter(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        filter_async(
            |value: i32, continuation: Continuation<bool>| continuation.succeed(value % 3 == 0),
            values.clone(),
            move |kept| *sink.borrow_mut() = Some(kept),
        );
        let expected = filter(|value: &i32, _: &usize, _: &[(usize, i32)]| value % 3 == 0, values);
        prop_assert_eq!(result.borrow_mut().take(), Some(expected));
    }

    #[test]
    fn prop_fold_async_agrees_with_fold(
        values in prop::collection::vec(any::<i64>(), 0..64),
        seed in any::<i64>(),
    ) {
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        fold_async(
            |total: i64, value: i64, continuation: Continuation<i64, String>| {
                continuation.succeed(total.wrapping_add(value));
            },
            values.clone(),
            seed,
            move |outcome| *sink.borrow_mut() = Some(outcome),
        );
        let expected = fold(|total: i64, value: i64| total.wrapping_add(value), values, seed);
        prop_assert_eq!(result.borrow_mut().take(), Some(Ok(expected)));
    }
}

// =============================================================================
// Halting
// =============================================================================

proptest! {
    #[test]
    fn prop_map_async_halts_at_first_failure(
        values in prop::collection::vec(0i32..1000, 1..48),
        index in any::<prop::sample::Index>(),
    ) {
        let failing = index.index(values.len());
        let invoked = Rc::new(RefCell::new(Vec::new()));
        let result = Rc::new(RefCell::new(None));

        let log = Rc::clone(&invoked);
        let sink = Rc::clone(&result);
        map_async(
            move |(position, value): (usize, i32), continuation: Continuation<i32, String>| {
                log.borrow_mut().push(position);
                if position == failing {
                    continuation.fail_with(format!("failed at {position}"), -value);
                } else {
                    continuation.succeed(value + 1);
                }
            },
            values.iter().copied().enumerate().collect::<Vec<_>>(),
            move |outcome| *sink.borrow_mut() = Some(outcome),
        );

        let outcome = result.borrow_mut().take();
        let Some(Err(halted)) = outcome else {
            return Err(TestCaseError::fail("traversal did not halt"));
        };
        prop_assert_eq!(halted.error, format!("failed at {failing}"));
        prop_assert_eq!(invoked.borrow().clone(), (0..=failing).collect::<Vec<_>>());

        for (position, slot) in halted.partial.into_iter().enumerate() {
            let original = values[position];
            let expected = match position.cmp(&failing) {
                std::cmp::Ordering::Less => Slot::Mapped(original + 1),
                std::cmp::Ordering::Equal => Slot::Mapped(-original),
                std::cmp::Ordering::Greater => Slot::Original((position, original)),
            };
            prop_assert_eq!(slot, expected);
        }
    }
}

// =============================================================================
// Shape
// =============================================================================

proptest! {
    #[test]
    fn prop_map_async_keeps_mapping_keys(
        entries in prop::collection::btree_map("[a-z]{1,6}", any::<i16>(), 0..32),
    ) {
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        map_async(
            |value: i16, continuation: Continuation<i32, String>| {
                continuation.succeed(i32::from(value) * 2);
            },
            entries.clone(),
            move |outcome| *sink.borrow_mut() = Some(outcome),
        );

        let mapped: BTreeMap<String, i32> = match result.borrow_mut().take() {
            Some(Ok(mapped)) => mapped,
            _ => return Err(TestCaseError::fail("map_async did not succeed")),
        };
        prop_assert_eq!(mapped.keys().collect::<Vec<_>>(), entries.keys().collect::<Vec<_>>());
        for (key, value) in &entries {
            prop_assert_eq!(mapped[key], i32::from(*value) * 2);
        }
    }
}
