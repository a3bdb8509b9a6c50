//! Path access and persistent nested updates.
//!
//! The updaters never mutate their input. They walk down the path once,
//! remembering every container on the way, and then rebuild that spine
//! bottom-up with a loop, so path length never turns into call depth.
//! A level whose child comes back [`JsonValue::is_same`] as before is
//! returned as-is, which makes "nothing changed" visible to callers as
//! `result.is_same(&doc)`.

use std::cmp::Ordering;

use json_edit_pointer::PathStep;

use crate::error::EditError;
use crate::value::JsonValue;

/// Value at `path`, or `None` when the path does not exist.
pub fn get_in<'a>(doc: &'a JsonValue, path: &[PathStep]) -> Option<&'a JsonValue> {
    let mut current = doc;
    for step in path {
        current = current.child(step)?;
    }
    Some(current)
}

/// Replace the value at `path`.
///
/// An empty path returns `value` itself. Every proper prefix of `path` must
/// resolve to a container. The last step may name a missing object member
/// (it is appended) or the index one past the end of an array (it is
/// pushed).
pub fn set_in(
    doc: &JsonValue,
    path: &[PathStep],
    value: JsonValue,
) -> Result<JsonValue, EditError> {
    update_in(doc, path, move |_| value)
}

/// Replace the value at `path` with `f` applied to the current one.
///
/// `f` receives `None` when the last step does not exist yet.
pub fn update_in<F>(doc: &JsonValue, path: &[PathStep], f: F) -> Result<JsonValue, EditError>
where
    F: FnOnce(Option<&JsonValue>) -> JsonValue,
{
    let mut spine: Vec<&JsonValue> = Vec::with_capacity(path.len());
    let mut current = Some(doc);
    for (depth, step) in path.iter().enumerate() {
        let container = match current {
            Some(value) if value.is_container() => value,
            _ => {
                return Err(EditError::PathResolution {
                    path: path[..depth].to_vec(),
                })
            }
        };
        spine.push(container);
        current = container.child(step);
    }

    let leaf = f(current);
    rebuild_spine(spine, path, leaf)
}

/// Remove the value at `path`.
///
/// Deleting the root is a no-op, and so is deleting anything that does not
/// exist: the input comes back unchanged. Removing an array element shifts
/// the following elements down.
pub fn delete_in(doc: &JsonValue, path: &[PathStep]) -> JsonValue {
    let Some((last, init)) = path.split_last() else {
        return doc.clone();
    };

    let mut spine: Vec<&JsonValue> = Vec::with_capacity(init.len());
    let mut current = doc;
    for step in init {
        spine.push(current);
        match current.child(step) {
            Some(child) => current = child,
            None => return doc.clone(),
        }
    }

    let pruned = match current {
        JsonValue::Object(map) => {
            let key = last.as_str();
            if !map.contains_key(key.as_ref()) {
                return doc.clone();
            }
            let mut map = (**map).clone();
            map.shift_remove(key.as_ref());
            JsonValue::from_map(map)
        }
        JsonValue::Array(items) => match last.as_index() {
            Some(index) if index < items.len() => {
                let mut items = (**items).clone();
                items.remove(index);
                JsonValue::from_vec(items)
            }
            _ => return doc.clone(),
        },
        _ => return doc.clone(),
    };

    // Every step on the spine resolved to an existing child, so rebuilding
    // cannot fail.
    rebuild_spine(spine, init, pruned).unwrap_or_else(|_| doc.clone())
}

/// Rebuild `spine[i]` with its child at `path[i]` replaced, from the deepest
/// level up to the root.
fn rebuild_spine(
    spine: Vec<&JsonValue>,
    path: &[PathStep],
    leaf: JsonValue,
) -> Result<JsonValue, EditError> {
    let mut updated = leaf;
    for (depth, container) in spine.into_iter().enumerate().rev() {
        updated = replace_child(container, &path[depth], updated, &path[..=depth])?;
    }
    Ok(updated)
}

fn replace_child(
    container: &JsonValue,
    step: &PathStep,
    child: JsonValue,
    at: &[PathStep],
) -> Result<JsonValue, EditError> {
    if let Some(existing) = container.child(step) {
        if existing.is_same(&child) {
            return Ok(container.clone());
        }
    }

    match container {
        JsonValue::Object(map) => {
            let mut map = (**map).clone();
            map.insert(step.as_str().into_owned(), child);
            Ok(JsonValue::from_map(map))
        }
        JsonValue::Array(items) => {
            let index = step
                .as_index()
                .ok_or_else(|| EditError::InvalidIndex { path: at.to_vec() })?;
            let mut items = (**items).clone();
            match index.cmp(&items.len()) {
                Ordering::Less => items[index] = child,
                Ordering::Equal => items.push(child),
                Ordering::Greater => return Err(EditError::InvalidIndex { path: at.to_vec() }),
            }
            Ok(JsonValue::from_vec(items))
        }
        _ => Err(EditError::PathResolution {
            path: at[..at.len() - 1].to_vec(),
        }),
    }
}
