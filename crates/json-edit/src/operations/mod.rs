//! Patch synthesis for editor intents.
//!
//! Each intent (insert, append, rename, replace, duplicate, remove) becomes
//! a patch document: an ordered list of [`Op`]s that a JSON Patch applier
//! can run against the current document. Nothing here mutates its input.
//!
//! Object members are kept in their displayed order. New keys can only be
//! added at the end of an object, so when they belong in the middle the
//! synthesizer follows the adds with `move` operations that send the keys
//! which should come after them back to the end (see [`reorder`]).

use std::collections::HashSet;
use std::str::FromStr;

use json_edit_pointer::{format_json_pointer, Path, PathStep};
use tracing::trace;

use crate::document_state::KeyOrder;
use crate::error::EditError;
use crate::immutable::get_in;
use crate::json_patch::Op;
use crate::selection::Selection;
use crate::unique_name::{CopySuffix, NameResolver};
use crate::value::{JsonValue, ObjectMap};

pub mod reorder;

pub use reorder::ReorderStrategy;
use reorder::{child_path, move_down, Splice};

/// A value waiting to be inserted. `key` only matters when the destination
/// is an object; a missing key becomes the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: Option<String>,
    pub value: JsonValue,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: JsonValue) -> Self {
        Self {
            key: Some(key.into()),
            value,
        }
    }

    pub fn value(value: JsonValue) -> Self {
        Self { key: None, value }
    }

    fn desired_key(&self) -> &str {
        self.key.as_deref().unwrap_or_default()
    }
}

/// Options for [`PatchSynthesizer`].
#[derive(Debug, Clone)]
pub struct SynthesizerOptions {
    pub reorder: ReorderStrategy,
    /// Sort multi-path selections into document order before use. When
    /// off, callers must pass them sorted.
    pub sort_paths: bool,
}

impl Default for SynthesizerOptions {
    fn default() -> Self {
        Self {
            reorder: ReorderStrategy::Minimal,
            sort_paths: true,
        }
    }
}

/// Turns edit intents into patch documents.
#[derive(Debug, Clone, Default)]
pub struct PatchSynthesizer<N = CopySuffix> {
    pub(crate) names: N,
    pub(crate) options: SynthesizerOptions,
}

impl PatchSynthesizer<CopySuffix> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: NameResolver> PatchSynthesizer<N> {
    pub fn with_resolver(names: N) -> Self {
        Self {
            names,
            options: SynthesizerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SynthesizerOptions) -> Self {
        self.options = options;
        self
    }

    /// Insert `entries` right before the existing child at `path`.
    pub fn insert_before<S: KeyOrder + ?Sized>(
        &self,
        doc: &JsonValue,
        state: &S,
        path: &[PathStep],
        entries: &[Entry],
    ) -> Result<Vec<Op>, EditError> {
        let (pivot, parent_path) = path
            .split_last()
            .ok_or_else(|| EditError::PathResolution { path: Vec::new() })?;

        match container(doc, parent_path)? {
            Container::Array(_) => {
                let offset = index_run(path, entries.len())?;
                Ok(add_at_indices(parent_path, offset, entries))
            }
            Container::Object(parent) => {
                let keys = state.keys(parent_path);
                let pivot = pivot.as_str();
                let removed = HashSet::new();
                let (mut ops, added) = self.add_entries(parent_path, parent, &removed, entries);
                let splice = Splice {
                    keys: &keys,
                    removed: &removed,
                    pivot: &pivot,
                    before_pivot: true,
                    added: &added,
                };
                ops.extend(self.reorder_ops(parent_path, &splice));
                Ok(ops)
            }
        }
    }

    /// Append `entries` at the end of the container at `path`.
    pub fn append(
        &self,
        doc: &JsonValue,
        path: &[PathStep],
        entries: &[Entry],
    ) -> Result<Vec<Op>, EditError> {
        match container(doc, path)? {
            Container::Array(items) => Ok(add_at_indices(path, items.len(), entries)),
            Container::Object(parent) => {
                let (ops, _) = self.add_entries(path, parent, &HashSet::new(), entries);
                Ok(ops)
            }
        }
    }

    /// Rename `old_key` to `new_key` in the object at `parent_path`,
    /// keeping it where it was among `keys`.
    ///
    /// `new_key` is used as given; resolve collisions before calling.
    pub fn rename(
        &self,
        parent_path: &[PathStep],
        keys: &[String],
        old_key: &str,
        new_key: &str,
    ) -> Vec<Op> {
        let mut ops = vec![Op::Move {
            from: child_path(parent_path, PathStep::from(old_key)),
            path: child_path(parent_path, PathStep::from(new_key)),
        }];
        let removed = HashSet::from([old_key]);
        let added = [new_key.to_string()];
        let splice = Splice {
            keys,
            removed: &removed,
            pivot: old_key,
            before_pivot: false,
            added: &added,
        };
        ops.extend(self.reorder_ops(parent_path, &splice));
        ops
    }

    /// Replace the children at `paths` with `entries`, at the position of
    /// the replaced block.
    ///
    /// Keys are made unique against the members that survive the removal,
    /// so replacing `a` with a new entry named `a` keeps the name `a`.
    pub fn replace<S: KeyOrder + ?Sized>(
        &self,
        doc: &JsonValue,
        state: &S,
        paths: &[Path],
        entries: &[Entry],
    ) -> Result<Vec<Op>, EditError> {
        let (parent_path, paths) = self.sibling_paths(doc, state, paths)?;

        match container(doc, &parent_path)? {
            Container::Array(_) => {
                let offset = index_run(&paths[0], entries.len())?;
                let mut ops = remove_all(&paths);
                ops.extend(add_at_indices(&parent_path, offset, entries));
                Ok(ops)
            }
            Container::Object(parent) => {
                let keys = state.keys(&parent_path);
                let removed_keys: Vec<String> = paths.iter().map(|path| last_key(path)).collect();
                let removed: HashSet<&str> = removed_keys.iter().map(String::as_str).collect();
                let pivot = last_key(&paths[paths.len() - 1]);

                let mut ops = remove_all(&paths);
                let (adds, added) = self.add_entries(&parent_path, parent, &removed, entries);
                ops.extend(adds);
                let splice = Splice {
                    keys: &keys,
                    removed: &removed,
                    pivot: &pivot,
                    before_pivot: false,
                    added: &added,
                };
                ops.extend(self.reorder_ops(&parent_path, &splice));
                Ok(ops)
            }
        }
    }

    /// Copy the children at `paths` and place the copies right after the
    /// last of them.
    pub fn duplicate<S: KeyOrder + ?Sized>(
        &self,
        doc: &JsonValue,
        state: &S,
        paths: &[Path],
    ) -> Result<Vec<Op>, EditError> {
        let (parent_path, paths) = self.sibling_paths(doc, state, paths)?;
        let last = &paths[paths.len() - 1];

        match container(doc, &parent_path)? {
            Container::Array(_) => {
                let offset = index_run(last, paths.len())? + 1;
                Ok(paths
                    .iter()
                    .enumerate()
                    .map(|(i, path)| Op::Copy {
                        from: path.clone(),
                        path: child_path(&parent_path, PathStep::Index(offset + i)),
                    })
                    .collect())
            }
            Container::Object(parent) => {
                let keys = state.keys(&parent_path);
                let pivot = last_key(last);
                let removed = HashSet::new();
                let mut taken = sibling_names(parent, &removed);
                let mut added = Vec::with_capacity(paths.len());
                let mut ops = Vec::with_capacity(paths.len() * 2);
                for path in &paths {
                    let new_key = self.names.find_unique_name(&last_key(path), &taken);
                    taken.insert(new_key.clone());
                    ops.push(Op::Copy {
                        from: path.clone(),
                        path: child_path(&parent_path, PathStep::from(new_key.as_str())),
                    });
                    added.push(new_key);
                }
                let splice = Splice {
                    keys: &keys,
                    removed: &removed,
                    pivot: &pivot,
                    before_pivot: false,
                    added: &added,
                };
                ops.extend(self.reorder_ops(&parent_path, &splice));
                Ok(ops)
            }
        }
    }

    /// Route a bulk insert by selection shape: before-point, append-point,
    /// or a multi selection to replace. Value and key selections are not
    /// insert targets.
    pub fn insert<S: KeyOrder + ?Sized>(
        &self,
        doc: &JsonValue,
        state: &S,
        selection: &Selection,
        entries: &[Entry],
    ) -> Result<Vec<Op>, EditError> {
        match selection {
            Selection::Before(path) => self.insert_before(doc, state, path, entries),
            Selection::Append(path) => self.append(doc, path, entries),
            Selection::Multi(paths) => self.replace(doc, state, paths, entries),
            Selection::Value(_) | Selection::Key(_) => Err(EditError::UnsupportedSelection),
        }
    }

    /// `add` operations for `entries` under uniquely resolved keys, plus the
    /// keys that were used. Keys in `removed` count as free.
    fn add_entries(
        &self,
        parent_path: &[PathStep],
        parent: &ObjectMap,
        removed: &HashSet<&str>,
        entries: &[Entry],
    ) -> (Vec<Op>, Vec<String>) {
        let mut taken = sibling_names(parent, removed);
        let mut ops = Vec::with_capacity(entries.len());
        let mut added = Vec::with_capacity(entries.len());
        for entry in entries {
            let key = self.names.find_unique_name(entry.desired_key(), &taken);
            taken.insert(key.clone());
            ops.push(Op::Add {
                path: child_path(parent_path, PathStep::from(key.as_str())),
                value: entry.value.clone(),
            });
            added.push(key);
        }
        (ops, added)
    }

    fn reorder_ops(&self, parent_path: &[PathStep], splice: &Splice<'_>) -> Vec<Op> {
        let keys = splice.moves(self.options.reorder);
        trace!(
            parent = %format_json_pointer(parent_path),
            moves = keys.len(),
            "restoring member order"
        );
        keys.iter().map(|key| move_down(parent_path, key)).collect()
    }

    /// Checks that `paths` is non-empty and shares one parent, and sorts it
    /// into document order when configured to.
    fn sibling_paths<S: KeyOrder + ?Sized>(
        &self,
        doc: &JsonValue,
        state: &S,
        paths: &[Path],
    ) -> Result<(Path, Vec<Path>), EditError> {
        let first = paths.first().ok_or(EditError::EmptySelection)?;
        let (_, parent_path) = first
            .split_last()
            .ok_or_else(|| EditError::PathResolution { path: Vec::new() })?;
        if paths
            .iter()
            .any(|path| path.is_empty() || path[..path.len() - 1] != *parent_path)
        {
            return Err(EditError::MixedParents);
        }

        let mut paths = paths.to_vec();
        if !self.options.sort_paths {
            return Ok((parent_path.to_vec(), paths));
        }
        match get_in(doc, parent_path) {
            Some(JsonValue::Array(_)) => {
                let mut indexed = paths
                    .into_iter()
                    .map(|path| array_index(&path).map(|index| (index, path)))
                    .collect::<Result<Vec<_>, _>>()?;
                indexed.sort_by_key(|(index, _)| *index);
                indexed.dedup_by_key(|(index, _)| *index);
                paths = indexed.into_iter().map(|(_, path)| path).collect();
            }
            _ => {
                let keys = state.keys(parent_path);
                paths.sort_by_key(|path| {
                    let key = last_key(path);
                    keys.iter().position(|k| *k == key).unwrap_or(keys.len())
                });
                paths.dedup();
            }
        }
        Ok((parent_path.to_vec(), paths))
    }
}

/// `remove` for a single path.
pub fn remove(path: &[PathStep]) -> Vec<Op> {
    vec![Op::Remove {
        path: path.to_vec(),
    }]
}

/// `remove` for each path, last one first, so that removing a high array
/// index never shifts a lower one still waiting to be removed.
pub fn remove_all(paths: &[Path]) -> Vec<Op> {
    paths
        .iter()
        .rev()
        .map(|path| Op::Remove { path: path.clone() })
        .collect()
}

/// Seed value for a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewValueKind {
    /// An empty string.
    Value,
    Object,
    Array,
    /// The shape of the first element of the array being inserted into.
    Structure,
}

impl FromStr for NewValueKind {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(NewValueKind::Value),
            "object" => Ok(NewValueKind::Object),
            "array" => Ok(NewValueKind::Array),
            "structure" => Ok(NewValueKind::Structure),
            other => Err(EditError::UnknownValueKind(other.to_string())),
        }
    }
}

/// The value a freshly inserted node starts with.
///
/// For [`NewValueKind::Structure`] the first element of the array the
/// selection edits in serves as the example: objects keep their keys,
/// nested arrays become empty and scalars become empty strings. Without an
/// example the result is an empty string.
pub fn create_new_value(doc: &JsonValue, selection: &Selection, kind: NewValueKind) -> JsonValue {
    match kind {
        NewValueKind::Value => JsonValue::from(""),
        NewValueKind::Object => JsonValue::empty_object(),
        NewValueKind::Array => JsonValue::empty_array(),
        NewValueKind::Structure => {
            match get_in(doc, &selection.parent_path()).and_then(JsonValue::as_array) {
                Some([example, ..]) => blank_structure(example),
                _ => JsonValue::from(""),
            }
        }
    }
}

fn blank_structure(example: &JsonValue) -> JsonValue {
    match example {
        JsonValue::Array(_) => JsonValue::empty_array(),
        JsonValue::Object(map) => JsonValue::from_map(
            map.iter()
                .map(|(key, value)| (key.clone(), blank_structure(value)))
                .collect(),
        ),
        _ => JsonValue::from(""),
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────

enum Container<'a> {
    Array(&'a [JsonValue]),
    Object(&'a ObjectMap),
}

/// The container at `path`, or a path resolution error.
fn container<'a>(doc: &'a JsonValue, path: &[PathStep]) -> Result<Container<'a>, EditError> {
    match get_in(doc, path) {
        Some(JsonValue::Array(items)) => Ok(Container::Array(items)),
        Some(JsonValue::Object(map)) => Ok(Container::Object(map)),
        _ => Err(EditError::PathResolution {
            path: path.to_vec(),
        }),
    }
}

fn add_at_indices(parent_path: &[PathStep], offset: usize, entries: &[Entry]) -> Vec<Op> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| Op::Add {
            path: child_path(parent_path, PathStep::Index(offset + i)),
            value: entry.value.clone(),
        })
        .collect()
}

/// The array index `path` ends in, provided `count` consecutive indices
/// starting there are addressable.
fn index_run(path: &[PathStep], count: usize) -> Result<usize, EditError> {
    let start = array_index(path)?;
    match start.checked_add(count) {
        Some(_) => Ok(start),
        None => Err(EditError::InvalidIndex {
            path: path.to_vec(),
        }),
    }
}

fn array_index(path: &[PathStep]) -> Result<usize, EditError> {
    path.last()
        .and_then(PathStep::as_index)
        .ok_or_else(|| EditError::InvalidIndex {
            path: path.to_vec(),
        })
}

fn last_key(path: &[PathStep]) -> String {
    path.last()
        .map(|step| step.as_str().into_owned())
        .unwrap_or_default()
}

fn sibling_names(parent: &ObjectMap, removed: &HashSet<&str>) -> HashSet<String> {
    parent
        .keys()
        .filter(|key| !removed.contains(key.as_str()))
        .cloned()
        .collect()
}
