//! Core types for the JSON Patch module.

use thiserror::Error;

pub use json_edit_pointer::Path;

use crate::value::JsonValue;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("INVALID_TARGET")]
    InvalidTarget,
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A JSON Patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Path, value: JsonValue },
    Remove { path: Path },
    Replace { path: Path, value: JsonValue },
    Copy { from: Path, path: Path },
    Move { from: Path, path: Path },
}

impl Op {
    /// Returns the operation name as it appears on the wire.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Copy { .. } => "copy",
            Op::Move { .. } => "move",
        }
    }

    /// Returns the target path of the operation.
    pub fn path(&self) -> &Path {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Copy { path, .. }
            | Op::Move { path, .. } => path,
        }
    }

    /// Returns the source path of `move` and `copy`.
    pub fn from(&self) -> Option<&Path> {
        match self {
            Op::Copy { from, .. } | Op::Move { from, .. } => Some(from),
            _ => None,
        }
    }

    /// A `move` onto its own location. Applying it sends an object member
    /// to the end of the enumeration order and leaves arrays untouched.
    pub fn is_self_move(&self) -> bool {
        matches!(self, Op::Move { from, path } if from == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_edit_pointer::path;

    #[test]
    fn self_move_detection() {
        let op = Op::Move {
            from: path!["a", "b"],
            path: path!["a", "b"],
        };
        assert!(op.is_self_move());
        assert_eq!(op.op_name(), "move");

        let op = Op::Move {
            from: path!["a", "b"],
            path: path!["a", "c"],
        };
        assert!(!op.is_self_move());

        let op = Op::Remove { path: path!["a"] };
        assert!(!op.is_self_move());
        assert_eq!(op.from(), None);
    }
}
