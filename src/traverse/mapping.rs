//! String-keyed targets.

use std::collections::{BTreeMap, HashMap};

use super::Traverse;

impl<T> Traverse for HashMap<String, T> {
    type Key = String;
    type Item = T;
    type Shape<U> = HashMap<String, U>;

    fn into_entries(self) -> Vec<(String, T)> {
        self.into_iter().collect()
    }

    fn assemble<U>(entries: Vec<(String, U)>) -> HashMap<String, U> {
        entries.into_iter().collect()
    }
}

impl<T> Traverse for BTreeMap<String, T> {
    type Key = String;
    type Item = T;
    type Shape<U> = BTreeMap<String, U>;

    fn into_entries(self) -> Vec<(String, T)> {
        self.into_iter().collect()
    }

    fn assemble<U>(entries: Vec<(String, U)>) -> BTreeMap<String, U> {
        entries.into_iter().collect()
    }
}
