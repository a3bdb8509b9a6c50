//! Visual key order of object members.
//!
//! JSON objects have no member order of their own, but an editor shows
//! members in a stable order and must keep it across edits. [`KeyOrder`] is
//! the seam through which the synthesizer learns that order.

use std::collections::{HashMap, HashSet};

use json_edit_pointer::Path;
use json_edit_pointer::PathStep;

use crate::immutable::get_in;
use crate::value::JsonValue;

/// Source of the displayed member order of objects in a document snapshot.
pub trait KeyOrder {
    /// Ordered member keys of the object at `parent_path`. Empty when the
    /// path does not name an object.
    fn keys(&self, parent_path: &[PathStep]) -> Vec<String>;
}

/// A document is its own key order: members enumerate in insertion order.
impl KeyOrder for JsonValue {
    fn keys(&self, parent_path: &[PathStep]) -> Vec<String> {
        get_in(self, parent_path)
            .map(JsonValue::member_keys)
            .unwrap_or_default()
    }
}

/// Editor snapshot: a document plus explicit display orders for some of
/// its objects.
#[derive(Debug, Clone, Default)]
pub struct DocumentState {
    document: JsonValue,
    key_orders: HashMap<Path, Vec<String>>,
}

impl DocumentState {
    pub fn new(document: JsonValue) -> Self {
        Self {
            document,
            key_orders: HashMap::new(),
        }
    }

    /// Record the display order of the object at `parent_path`.
    pub fn with_key_order(mut self, parent_path: &[PathStep], keys: Vec<String>) -> Self {
        self.key_orders.insert(parent_path.to_vec(), keys);
        self
    }

    pub fn document(&self) -> &JsonValue {
        &self.document
    }
}

impl KeyOrder for DocumentState {
    /// Recorded keys that still exist come first, in recorded order; members
    /// the record does not know about follow in document order.
    fn keys(&self, parent_path: &[PathStep]) -> Vec<String> {
        let actual = self.document.keys(parent_path);
        let Some(recorded) = self.key_orders.get(parent_path) else {
            return actual;
        };
        let present: HashSet<&str> = actual.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        let mut keys: Vec<String> = recorded
            .iter()
            .filter(|key| present.contains(key.as_str()) && seen.insert(key.as_str()))
            .cloned()
            .collect();
        keys.extend(actual.iter().filter(|key| !seen.contains(key.as_str())).cloned());
        keys
    }
}

/// Keys positioned after `pivot`, or at-and-after it when `inclusive`.
///
/// Returns an empty list when `pivot` is not among `keys`.
pub fn next_keys(keys: &[String], pivot: &str, inclusive: bool) -> Vec<String> {
    match keys.iter().position(|key| key == pivot) {
        Some(index) => {
            let start = if inclusive { index } else { index + 1 };
            keys[start..].to_vec()
        }
        None => Vec::new(),
    }
}
