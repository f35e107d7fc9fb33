//! Serde round trips for outcomes and partial results.

#![cfg(all(feature = "serde", feature = "combinator"))]

use functools::combinator::{Halted, Slot};
use functools::control::Outcome;
use rstest::rstest;

#[rstest]
#[case(Outcome::Success(3))]
#[case(Outcome::failure("late".to_string()))]
#[case(Outcome::failure_with("late".to_string(), 7))]
fn outcome_json_roundtrip(#[case] outcome: Outcome<i32, String>) {
    let json = serde_json::to_string(&outcome).unwrap();
    let decoded: Outcome<i32, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, outcome);
}

#[rstest]
fn halted_map_output_roundtrip() {
    let halted = Halted {
        error: "boom".to_string(),
        partial: vec![Slot::Mapped("9".to_string()), Slot::Original(1)],
    };
    let json = serde_json::to_string(&halted).unwrap();
    let decoded: Halted<String, Vec<Slot<i32, String>>> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, halted);
}

#[rstest]
fn slot_json_uses_variant_names() {
    let json = serde_json::to_value(Slot::<i32, i32>::Original(4)).unwrap();
    assert_eq!(json, serde_json::json!({ "Original": 4 }));
}
