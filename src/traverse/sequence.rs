//! Ordered, index-keyed targets.

use std::collections::VecDeque;

use super::Traverse;

impl<T> Traverse for Vec<T> {
    type Key = usize;
    type Item = T;
    type Shape<U> = Vec<U>;

    fn into_entries(self) -> Vec<(usize, T)> {
        self.into_iter().enumerate().collect()
    }

    fn assemble<U>(entries: Vec<(usize, U)>) -> Vec<U> {
        entries.into_iter().map(|(_, value)| value).collect()
    }
}

impl<T> Traverse for VecDeque<T> {
    type Key = usize;
    type Item = T;
    type Shape<U> = VecDeque<U>;

    fn into_entries(self) -> Vec<(usize, T)> {
        self.into_iter().enumerate().collect()
    }

    fn assemble<U>(entries: Vec<(usize, U)>) -> VecDeque<U> {
        entries.into_iter().map(|(_, value)| value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn vec_entries_are_indexed_in_ascending_order() {
        let entries = vec!['a', 'b', 'c'].into_entries();
        assert_eq!(entries, vec![(0, 'a'), (1, 'b'), (2, 'c')]);
    }

    #[rstest]
    fn vec_assemble_compacts_a_subset() {
        let kept = Vec::<i32>::assemble(vec![(1, 10), (4, 40)]);
        assert_eq!(kept, vec![10, 40]);
    }

    #[rstest]
    fn vec_deque_round_trips() {
        let target: VecDeque<i32> = VecDeque::from(vec![3, 1, 4]);
        let rebuilt = VecDeque::<i32>::assemble(target.clone().into_entries());
        assert_eq!(rebuilt, target);
    }

    #[rstest]
    fn empty_sequence_has_no_entries() {
        assert!(Vec::<u8>::new().into_entries().is_empty());
    }
}
