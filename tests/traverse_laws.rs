//! Property-based tests for `Traverse` laws.
//!
//! - **Round trip**: `assemble(into_entries(t)) == t`
//! - **Stable order**: sequences visit ascending indices, `BTreeMap`s
//!   ascending keys
//! - **Dense subsets**: assembling a subset of sequence entries keeps the
//!   relative order

#![cfg(feature = "traverse")]

use std::collections::{BTreeMap, HashMap, VecDeque};

use functools::traverse::Traverse;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_vec_round_trip(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let rebuilt = Vec::<i32>::assemble(values.clone().into_entries());
        prop_assert_eq!(rebuilt, values);
    }

    #[test]
    fn prop_vec_deque_round_trip(values in prop::collection::vec_deque(any::<u8>(), 0..64)) {
        let rebuilt = VecDeque::<u8>::assemble(values.clone().into_entries());
        prop_assert_eq!(rebuilt, values);
    }

    #[test]
    fn prop_hash_map_round_trip(
        values in prop::collection::hash_map("[a-z]{0,4}", any::<i64>(), 0..32),
    ) {
        let rebuilt = HashMap::<String, i64>::assemble(values.clone().into_entries());
        prop_assert_eq!(rebuilt, values);
    }

    #[test]
    fn prop_btree_map_visits_keys_in_order(
        values in prop::collection::btree_map("[a-z]{0,4}", any::<i64>(), 0..32),
    ) {
        let keys: Vec<String> =
            values.clone().into_entries().into_iter().map(|(key, _)| key).collect();
        let expected: Vec<String> = values.keys().cloned().collect();
        prop_assert_eq!(keys, expected);
        prop_assert_eq!(BTreeMap::<String, i64>::assemble(values.clone().into_entries()), values);
    }

    #[test]
    fn prop_sequence_indices_ascend(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let indices: Vec<usize> =
            values.into_entries().into_iter().map(|(index, _)| index).collect();
        prop_assert_eq!(indices.clone(), (0..indices.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_sequence_subset_stays_dense(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let kept: Vec<(usize, i32)> = values
            .clone()
            .into_entries()
            .into_iter()
            .filter(|(_, value)| value % 2 == 0)
            .collect();
        let rebuilt = Vec::<i32>::assemble(kept);
        let expected: Vec<i32> = values.into_iter().filter(|value| value % 2 == 0).collect();
        prop_assert_eq!(rebuilt, expected);
    }
}
