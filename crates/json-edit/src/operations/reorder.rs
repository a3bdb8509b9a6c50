//! Member reordering after keys are spliced into an object.
//!
//! Patch operations can only add members at the end of an object's
//! enumeration order. To make new keys appear in the middle, keys that must
//! end up after them are re-sent to the end with a `move` onto their own
//! path.

use std::collections::HashSet;

use json_edit_pointer::{Path, PathStep};

use crate::document_state::next_keys;
use crate::json_patch::Op;

/// How trailing members are put back in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderStrategy {
    /// Diff the order the patch leaves behind against the wanted order and
    /// move only what has to travel.
    #[default]
    Minimal,
    /// Move every key positioned after the splice point, whether it needs
    /// to or not.
    TrailingKeys,
}

/// Where new keys go relative to the existing ones.
pub(crate) struct Splice<'a> {
    /// Display order before the edit.
    pub keys: &'a [String],
    /// Existing keys the patch removes.
    pub removed: &'a HashSet<&'a str>,
    /// Existing key the new keys are placed relative to.
    pub pivot: &'a str,
    /// Place the new keys before the pivot rather than after it.
    pub before_pivot: bool,
    /// Keys the patch appends, in order.
    pub added: &'a [String],
}

impl Splice<'_> {
    /// Index in `keys` where the new keys go. An unknown pivot splices at
    /// the end.
    fn at(&self) -> usize {
        match self.keys.iter().position(|key| key == self.pivot) {
            Some(index) if self.before_pivot => index,
            Some(index) => index + 1,
            None => self.keys.len(),
        }
    }

    /// Order the members enumerate in once the patch has removed and
    /// appended its keys.
    fn current_order(&self) -> Vec<&str> {
        self.surviving(self.keys)
            .chain(self.added.iter().map(String::as_str))
            .collect()
    }

    /// Order the user expects to see.
    fn desired_order(&self) -> Vec<&str> {
        let (head, tail) = self.keys.split_at(self.at());
        self.surviving(head)
            .chain(self.added.iter().map(String::as_str))
            .chain(self.surviving(tail))
            .collect()
    }

    fn surviving<'k>(&'k self, keys: &'k [String]) -> impl Iterator<Item = &'k str> + 'k {
        keys.iter()
            .map(String::as_str)
            .filter(move |key| !self.removed.contains(key))
    }

    /// Keys to re-send to the end, in order.
    pub fn moves(&self, strategy: ReorderStrategy) -> Vec<String> {
        match strategy {
            ReorderStrategy::Minimal => {
                let current = self.current_order();
                let desired = self.desired_order();
                // The longest prefix of the wanted order that already appears
                // in order can stay; everything after it moves.
                let mut cursor = current.iter();
                let kept = desired
                    .iter()
                    .take_while(|key| cursor.any(|c| c == *key))
                    .count();
                desired[kept..].iter().map(|key| key.to_string()).collect()
            }
            ReorderStrategy::TrailingKeys => next_keys(self.keys, self.pivot, self.before_pivot)
                .into_iter()
                .filter(|key| !self.removed.contains(key.as_str()))
                .collect(),
        }
    }
}

/// A `move` of `parent_path/key` onto itself.
pub(crate) fn move_down(parent_path: &[PathStep], key: &str) -> Op {
    let path = child_path(parent_path, PathStep::from(key));
    Op::Move {
        from: path.clone(),
        path,
    }
}

pub(crate) fn child_path(parent_path: &[PathStep], step: PathStep) -> Path {
    let mut path = Vec::with_capacity(parent_path.len() + 1);
    path.extend_from_slice(parent_path);
    path.push(step);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn moves(
        k: &[&str],
        removed: &[&str],
        (pivot, before_pivot): (&str, bool),
        added: &[&str],
        strategy: ReorderStrategy,
    ) -> Vec<String> {
        let k = keys(k);
        let added = keys(added);
        let removed: HashSet<&str> = removed.iter().copied().collect();
        Splice {
            keys: &k,
            removed: &removed,
            pivot,
            before_pivot,
            added: &added,
        }
        .moves(strategy)
    }

    #[test]
    fn insert_in_the_middle_moves_the_tail() {
        let m = moves(&["a", "b", "c"], &[], ("b", true), &["x"], ReorderStrategy::Minimal);
        assert_eq!(m, keys(&["b", "c"]));
        let m = moves(&["a", "b", "c"], &[], ("b", true), &["x"], ReorderStrategy::TrailingKeys);
        assert_eq!(m, keys(&["b", "c"]));
    }

    #[test]
    fn nothing_added_needs_no_moves() {
        let m = moves(&["a", "b", "c"], &["b"], ("b", false), &[], ReorderStrategy::Minimal);
        assert!(m.is_empty());
        let m = moves(&["a", "b", "c"], &["b"], ("b", false), &[], ReorderStrategy::TrailingKeys);
        assert_eq!(m, keys(&["c"]));
    }

    #[test]
    fn unknown_pivot_splices_at_the_end() {
        let m = moves(&["a", "b"], &[], ("zz", true), &["x"], ReorderStrategy::Minimal);
        assert!(m.is_empty());
        let m = moves(&["a", "b"], &[], ("zz", true), &["x"], ReorderStrategy::TrailingKeys);
        assert!(m.is_empty());
    }

    #[test]
    fn appending_at_the_end_needs_no_moves() {
        let m = moves(&["a", "b"], &[], ("b", false), &["c"], ReorderStrategy::Minimal);
        assert!(m.is_empty());
    }

    #[test]
    fn removed_keys_are_never_moved() {
        let m = moves(
            &["a", "b", "c", "d"],
            &["b", "d"],
            ("c", false),
            &["x"],
            ReorderStrategy::TrailingKeys,
        );
        assert!(m.is_empty());
        let m = moves(
            &["a", "b", "c", "d"],
            &["a", "c"],
            ("a", false),
            &["x"],
            ReorderStrategy::Minimal,
        );
        assert_eq!(m, keys(&["b", "d"]));
    }
}
