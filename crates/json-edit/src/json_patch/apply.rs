//! JSON Patch apply logic.
//!
//! Every operation goes through the persistent updaters in
//! [`crate::immutable`], so applying a patch returns a new document and
//! leaves the input intact. Object members added by `add` land last in
//! enumeration order, `remove` keeps the order of the remaining members,
//! and a `move` onto its own path sends the member to the end.

use json_edit_pointer::{is_child, PathStep};

use super::types::{Op, PatchError};
use crate::immutable::{delete_in, get_in, set_in};
use crate::value::JsonValue;

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(
    doc: &JsonValue,
    path: &[PathStep],
    value: JsonValue,
) -> Result<JsonValue, PatchError> {
    let Some((key, parent_path)) = path.split_last() else {
        return Ok(value);
    };
    let parent = get_in(doc, parent_path).ok_or(PatchError::NotFound)?;
    let updated_parent = match parent {
        JsonValue::Object(map) => {
            let mut map = (**map).clone();
            map.insert(key.as_str().into_owned(), value);
            JsonValue::from_map(map)
        }
        JsonValue::Array(items) => {
            let index = if key.as_str() == "-" {
                items.len()
            } else {
                key.as_index().ok_or(PatchError::InvalidIndex)?
            };
            if index > items.len() {
                return Err(PatchError::InvalidIndex);
            }
            let mut items = (**items).clone();
            items.insert(index, value);
            JsonValue::from_vec(items)
        }
        _ => return Err(PatchError::InvalidTarget),
    };
    set_in(doc, parent_path, updated_parent).map_err(|_| PatchError::NotFound)
}

fn apply_remove(doc: &JsonValue, path: &[PathStep]) -> Result<JsonValue, PatchError> {
    if path.is_empty() {
        return Err(PatchError::InvalidTarget);
    }
    get_in(doc, path).ok_or(PatchError::NotFound)?;
    Ok(delete_in(doc, path))
}

fn apply_replace(
    doc: &JsonValue,
    path: &[PathStep],
    value: JsonValue,
) -> Result<JsonValue, PatchError> {
    get_in(doc, path).ok_or(PatchError::NotFound)?;
    set_in(doc, path, value).map_err(|_| PatchError::NotFound)
}

fn apply_copy(
    doc: &JsonValue,
    path: &[PathStep],
    from: &[PathStep],
) -> Result<JsonValue, PatchError> {
    let value = get_in(doc, from).ok_or(PatchError::NotFound)?.clone();
    apply_add(doc, path, value)
}

fn apply_move(
    doc: &JsonValue,
    path: &[PathStep],
    from: &[PathStep],
) -> Result<JsonValue, PatchError> {
    // a value cannot be moved into one of its own descendants
    if is_child(from, path) {
        return Err(PatchError::InvalidTarget);
    }
    let value = get_in(doc, from).ok_or(PatchError::NotFound)?.clone();
    let removed = apply_remove(doc, from)?;
    apply_add(&removed, path, value)
}

// ── Public API ────────────────────────────────────────────────────────────

/// Apply a single operation, returning the new document.
pub fn apply_op(doc: &JsonValue, op: &Op) -> Result<JsonValue, PatchError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => apply_remove(doc, path),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()),
        Op::Copy { from, path } => apply_copy(doc, path, from),
        Op::Move { from, path } => apply_move(doc, path, from),
    }
}

/// Apply a patch document in order. Fails on the first operation that
/// cannot be applied; the input document is never modified.
pub fn apply_patch(doc: &JsonValue, ops: &[Op]) -> Result<JsonValue, PatchError> {
    ops.iter().try_fold(doc.clone(), |current, op| apply_op(&current, op))
}
