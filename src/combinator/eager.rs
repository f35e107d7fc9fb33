//! Synchronous single-pass counterparts of the asynchronous traversals.
//!
//! They share the shape rules of [`Traverse`]: a sequence stays a sequence
//! and a mapping stays a mapping. The steps of [`each`], [`map`] and
//! [`filter`] receive the element, its key, and the whole target as its
//! entries in visit order.

use crate::traverse::Traverse;

/// The whole target as seen by a synchronous step: every `(key, value)`
/// entry in visit order.
pub type EntriesView<'a, C> = &'a [(<C as Traverse>::Key, <C as Traverse>::Item)];

/// Calls `function` on every element in visit order.
///
/// ```rust
/// use functools::combinator::each;
///
/// let mut seen = Vec::new();
/// each(
///     |value: &char, index: &usize, entries: &[(usize, char)]| {
///         assert_eq!(entries[*index].1, *value);
///         seen.push((*index, *value));
///     },
///     vec!['a', 'b'],
/// );
/// assert_eq!(seen, vec![(0, 'a'), (1, 'b')]);
/// ```
pub fn each<C, F>(mut function: F, target: C)
where
    C: Traverse,
    F: FnMut(&C::Item, &C::Key, EntriesView<'_, C>),
{
    let entries = target.into_entries();
    for (key, value) in &entries {
        function(value, key, &entries);
    }
}

/// Maps every element into a container of the same shape.
///
/// ```rust
/// use functools::combinator::map;
/// use std::collections::HashMap;
///
/// let squares = map(|value: &i32, _: &usize, _: &[(usize, i32)]| value * value, vec![3, 1, 4]);
/// assert_eq!(squares, vec![9, 1, 16]);
///
/// let share = map(
///     |value: &u32, _: &String, entries: &[(String, u32)]| {
///         value * 100 / entries.iter().map(|(_, value)| value).sum::<u32>()
///     },
///     HashMap::from([("a".to_string(), 1), ("b".to_string(), 3)]),
/// );
/// assert_eq!(share["b"], 75);
/// ```
pub fn map<C, U, F>(mut function: F, target: C) -> C::Shape<U>
where
    C: Traverse,
    F: FnMut(&C::Item, &C::Key, EntriesView<'_, C>) -> U,
{
    let entries = target.into_entries();
    let mapped = entries
        .iter()
        .map(|(key, value)| (key.clone(), function(value, key, &entries)))
        .collect();
    C::assemble(mapped)
}

/// Keeps the elements for which `predicate` returns `true`.
///
/// ```rust
/// use functools::combinator::filter;
///
/// let evens = filter(
///     |value: &i32, _: &usize, _: &[(usize, i32)]| value % 2 == 0,
///     vec![3, 1, 4, 1, 5, 9],
/// );
/// assert_eq!(evens, vec![4]);
/// ```
pub fn filter<C, F>(mut predicate: F, target: C) -> C::Shape<C::Item>
where
    C: Traverse,
    F: FnMut(&C::Item, &C::Key, EntriesView<'_, C>) -> bool,
{
    let entries = target.into_entries();
    let keep: Vec<bool> = entries
        .iter()
        .map(|(key, value)| predicate(value, key, &entries))
        .collect();
    C::assemble(
        entries
            .into_iter()
            .zip(keep)
            .filter_map(|(entry, keep)| keep.then_some(entry))
            .collect(),
    )
}

/// Folds the elements into an accumulator starting from `seed`.
pub fn fold<C, A, F>(mut function: F, target: C, seed: A) -> A
where
    C: Traverse,
    F: FnMut(A, C::Item) -> A,
{
    target
        .into_entries()
        .into_iter()
        .fold(seed, |accumulator, (_, value)| function(accumulator, value))
}

/// Folds the elements using the first one as the seed.
///
/// Returns `None` for an empty target.
///
/// ```rust
/// use functools::combinator::reduce;
///
/// assert_eq!(reduce(|product, value| product * value, vec![3, 1, 4, 1, 5, 9]), Some(540));
/// assert_eq!(reduce(|product: i32, value| product * value, Vec::new()), None);
/// ```
pub fn reduce<C, F>(function: F, target: C) -> Option<C::Item>
where
    C: Traverse,
    F: FnMut(C::Item, C::Item) -> C::Item,
{
    target
        .into_entries()
        .into_iter()
        .map(|(_, value)| value)
        .reduce(function)
}

/// Returns a function applying every function of `functions` to the same
/// argument, collecting the results in the same shape.
///
/// ```rust
/// use functools::combinator::juxt;
///
/// let functions: Vec<Box<dyn Fn(&i32) -> i32>> = vec![
///     Box::new(|x| x * x * x),
///     Box::new(|x| x + x),
///     Box::new(|x| x / 2),
///     Box::new(|x| x * 3),
/// ];
/// let stats = juxt(functions);
/// assert_eq!(stats(&2), vec![8, 4, 1, 6]);
/// ```
pub fn juxt<C, A, R>(functions: C) -> impl Fn(&A) -> C::Shape<R>
where
    C: Traverse,
    C::Item: Fn(&A) -> R,
{
    let entries = functions.into_entries();
    move |args| {
        C::assemble(
            entries
                .iter()
                .map(|(key, function)| (key.clone(), function(args)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeMap;

    #[rstest]
    fn map_passes_keys_of_a_mapping() {
        let target = BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
        let labelled = map(
            |value: &i32, key: &String, _: &[(String, i32)]| format!("{key}{value}"),
            target,
        );
        assert_eq!(labelled["a"], "a1");
        assert_eq!(labelled["b"], "b2");
    }

    #[rstest]
    fn filter_keeps_a_mapping_a_mapping() {
        let target = BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
        let kept = filter(|value: &i32, _: &String, _: &[(String, i32)]| *value > 1, target);
        assert_eq!(kept, BTreeMap::from([("b".to_string(), 2)]));
    }

    #[rstest]
    fn each_sees_the_whole_sequence() {
        let range = vec![3, 1, 4, 1, 5, 9];
        let mut serial = 0;
        each(
            |value: &i32, index: &usize, entries: &[(usize, i32)]| {
                assert_eq!(*index, serial);
                assert_eq!(entries.len(), 6);
                assert_eq!(entries[*index], (*index, *value));
                serial += 1;
            },
            range,
        );
        assert_eq!(serial, 6);
    }

    #[rstest]
    fn filter_sees_an_unmodified_target() {
        let range = vec![3, 1, 4, 1, 5, 9];
        let expected: Vec<(usize, i32)> = range.clone().into_iter().enumerate().collect();
        let evens = filter(
            |value: &i32, index: &usize, entries: &[(usize, i32)]| {
                assert_eq!(entries, expected.as_slice());
                assert_eq!(entries[*index].1, *value);
                value % 2 == 0
            },
            range,
        );
        assert_eq!(evens, vec![4]);
    }

    #[rstest]
    fn map_can_use_neighbouring_entries() {
        let deltas = map(
            |value: &i32, index: &usize, entries: &[(usize, i32)]| {
                index.checked_sub(1).map_or(0, |previous| value - entries[previous].1)
            },
            vec![1, 4, 9, 16],
        );
        assert_eq!(deltas, vec![0, 3, 5, 7]);
    }

    #[rstest]
    fn fold_of_empty_target_is_the_seed() {
        assert_eq!(fold(|total: i32, value: i32| total + value, Vec::new(), 7), 7);
    }

    #[rstest]
    fn juxt_over_a_mapping() {
        let functions: BTreeMap<String, fn(&i32) -> i32> = BTreeMap::from([
            ("double".to_string(), (|x: &i32| x * 2) as fn(&i32) -> i32),
            ("negate".to_string(), (|x: &i32| -x) as fn(&i32) -> i32),
        ]);
        let apply = juxt(functions);
        let result = apply(&5);
        assert_eq!(result["double"], 10);
        assert_eq!(result["negate"], -5);
        assert_eq!(apply(&1)["double"], 2);
    }
}
