//! Editor selections.

use json_edit_pointer::{Path, PathStep};

use crate::json_patch::Op;

/// What the user has selected. Exactly one shape per instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A single value.
    Value(Path),
    /// The key of an object member.
    Key(Path),
    /// The insertion point right before an existing child.
    Before(Path),
    /// The insertion point at the end of the container at the path.
    Append(Path),
    /// Several siblings, in document order.
    Multi(Vec<Path>),
}

impl Selection {
    /// The container this selection edits in.
    pub fn parent_path(&self) -> Path {
        match self {
            Selection::Value(path) | Selection::Key(path) | Selection::Before(path) => {
                init(path)
            }
            Selection::Append(path) => path.clone(),
            Selection::Multi(paths) => paths.first().map(|path| init(path)).unwrap_or_default(),
        }
    }
}

fn init(path: &[PathStep]) -> Path {
    path.split_last()
        .map(|(_, parent)| parent.to_vec())
        .unwrap_or_default()
}

/// The selection to show after `ops` have been applied.
///
/// - a lone `replace` keeps its value selected;
/// - a patch that starts with a rename (a `move` to a different path)
///   selects the renamed key;
/// - otherwise everything the patch created is selected: the targets of
///   `add`, `copy` and non-self `move` operations.
pub fn selection_from_operations(ops: &[Op]) -> Selection {
    if let [Op::Replace { path, .. }] = ops {
        return Selection::Value(path.clone());
    }

    if let Some(Op::Move { from, path }) = ops.first() {
        if from != path {
            return Selection::Key(path.clone());
        }
    }

    let paths = ops
        .iter()
        .filter_map(|op| match op {
            Op::Add { path, .. } | Op::Copy { path, .. } => Some(path.clone()),
            Op::Move { .. } if !op.is_self_move() => Some(op.path().clone()),
            _ => None,
        })
        .collect();
    Selection::Multi(paths)
}
