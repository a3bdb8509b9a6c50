//! Pasting clipboard text into a document.
//!
//! Clipboard text is often a fragment cut out of a larger document: a few
//! members without their braces, a list without its brackets, a trailing
//! comma, or a value cut off halfway. [`parse_partial_json`] tries a short
//! list of repairs before giving up, and [`PatchSynthesizer::create_paste_operations`]
//! turns the result into a patch for the current selection.

use std::collections::HashSet;

use json_edit_pointer::PathStep;
use tracing::debug;

use crate::document_state::KeyOrder;
use crate::error::EditError;
use crate::immutable::get_in;
use crate::json_patch::Op;
use crate::operations::{Entry, PatchSynthesizer};
use crate::selection::{selection_from_operations, Selection};
use crate::unique_name::NameResolver;
use crate::value::JsonValue;

/// Patch for a paste, plus the selection to show once it is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteResult {
    pub operations: Vec<Op>,
    pub selection: Selection,
}

/// Parse possibly incomplete JSON text.
///
/// After dropping one trailing comma, the text is tried as-is, wrapped in
/// `[...]`, wrapped in `{...}`, and finally with its unclosed strings,
/// arrays and objects closed. There is no fallback to a plain string.
pub fn parse_partial_json(text: &str) -> Result<JsonValue, EditError> {
    let trimmed = text.trim_end();
    let text = trimmed.strip_suffix(',').unwrap_or(trimmed);

    let attempts: [(&str, Option<String>); 4] = [
        ("as-is", Some(text.to_string())),
        ("array", Some(format!("[{text}]"))),
        ("object", Some(format!("{{{text}}}"))),
        ("closed", close_open_containers(text)),
    ];
    for (repair, candidate) in attempts {
        let Some(candidate) = candidate else { continue };
        if let Ok(value) = JsonValue::parse(&candidate) {
            debug!(repair, "parsed clipboard text");
            return Ok(value);
        }
    }
    Err(EditError::ClipboardParse)
}

/// `text` with an unterminated string closed and every unclosed `[`/`{`
/// closed in order. `None` when nothing is open.
fn close_open_containers(text: &str) -> Option<String> {
    let mut closers = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for c in text.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => closers.push(']'),
            '{' => closers.push('}'),
            ']' | '}' => {
                closers.pop();
            }
            _ => {}
        }
    }
    if closers.is_empty() && !in_string {
        return None;
    }

    let mut repaired = text.to_string();
    if in_string {
        if escaped {
            repaired.pop();
        }
        repaired.push('"');
    }
    let body = repaired.trim_end();
    let mut repaired = body.strip_suffix(',').unwrap_or(body).to_string();
    repaired.extend(closers.iter().rev());
    Some(repaired)
}

/// Entries to insert for a clipboard value: one per array element (keyed
/// `New item <index>`), one per object member, or a single `New Item`.
pub fn clipboard_to_entries(clipboard: &JsonValue) -> Vec<Entry> {
    match clipboard {
        JsonValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| Entry::new(format!("New item {index}"), value.clone()))
            .collect(),
        JsonValue::Object(map) => map
            .iter()
            .map(|(key, value)| Entry::new(key.clone(), value.clone()))
            .collect(),
        scalar => vec![Entry::new("New Item", scalar.clone())],
    }
}

/// Text a scalar contributes when it is pasted as a key.
fn key_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<N: NameResolver> PatchSynthesizer<N> {
    /// Patch for pasting `clipboard_text` at `selection`.
    ///
    /// - a selected value is replaced by the pasted value;
    /// - a selected key is renamed to a pasted scalar, or its member is
    ///   replaced by the members of a pasted array or object;
    /// - any other selection receives the pasted entries through
    ///   [`PatchSynthesizer::insert`].
    pub fn create_paste_operations<S: KeyOrder + ?Sized>(
        &self,
        doc: &JsonValue,
        state: &S,
        selection: &Selection,
        clipboard_text: &str,
    ) -> Result<PasteResult, EditError> {
        let clipboard = parse_partial_json(clipboard_text)?;

        match selection {
            Selection::Value(path) => Ok(PasteResult {
                operations: vec![Op::Replace {
                    path: path.clone(),
                    value: clipboard,
                }],
                selection: selection.clone(),
            }),
            Selection::Key(path) if !clipboard.is_container() => {
                self.paste_key(doc, state, path, &clipboard)
            }
            Selection::Key(path) => {
                let entries = self.paste_entries(&clipboard);
                let target = Selection::Multi(vec![path.clone()]);
                let operations = self.insert(doc, state, &target, &entries)?;
                let selection = selection_from_operations(&operations);
                Ok(PasteResult {
                    operations,
                    selection,
                })
            }
            _ => {
                let entries = self.paste_entries(&clipboard);
                let operations = self.insert(doc, state, selection, &entries)?;
                let selection = selection_from_operations(&operations);
                Ok(PasteResult {
                    operations,
                    selection,
                })
            }
        }
    }

    /// Rename the selected key to the pasted scalar.
    fn paste_key<S: KeyOrder + ?Sized>(
        &self,
        doc: &JsonValue,
        state: &S,
        key_path: &[PathStep],
        clipboard: &JsonValue,
    ) -> Result<PasteResult, EditError> {
        let (old_key, parent_path) = key_path
            .split_last()
            .ok_or_else(|| EditError::PathResolution { path: Vec::new() })?;
        let parent = get_in(doc, parent_path)
            .and_then(JsonValue::as_object)
            .ok_or_else(|| EditError::PathResolution {
                path: parent_path.to_vec(),
            })?;

        let siblings: HashSet<String> = parent.keys().cloned().collect();
        let new_key = self.names.find_unique_name(&key_text(clipboard), &siblings);
        let keys = state.keys(parent_path);
        let operations = self.rename(parent_path, &keys, &old_key.as_str(), &new_key);

        let mut new_path = parent_path.to_vec();
        new_path.push(PathStep::Key(new_key));
        Ok(PasteResult {
            operations,
            selection: Selection::Key(new_path),
        })
    }

    fn paste_entries(&self, clipboard: &JsonValue) -> Vec<Entry> {
        let entries = clipboard_to_entries(clipboard);
        debug!(
            shape = clipboard.type_name(),
            entries = entries.len(),
            "converted clipboard into entries"
        );
        entries
    }
}
