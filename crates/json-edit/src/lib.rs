//! Patch synthesis for a structured JSON editor.
//!
//! Editor intents (insert, append, rename, replace, duplicate, remove,
//! paste) become JSON Patch documents that keep object members in their
//! displayed order, together with the persistent nested updates used to
//! apply them.
//!
//! # Example
//!
//! ```
//! use json_edit::{apply_patch, Entry, JsonValue, PatchSynthesizer};
//! use json_edit_pointer::path;
//!
//! let doc = JsonValue::parse(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();
//! let synth = PatchSynthesizer::new();
//! let ops = synth
//!     .insert_before(&doc, &doc, &path!["b"], &[Entry::new("x", JsonValue::from(9))])
//!     .unwrap();
//! let out = apply_patch(&doc, &ops).unwrap();
//! assert_eq!(out.member_keys(), ["a", "x", "b", "c"]);
//! ```

pub mod value;
pub mod immutable;
pub mod json_patch;
pub mod document_state;
pub mod unique_name;
pub mod selection;
pub mod operations;
pub mod clipboard;
pub mod error;
pub mod cli;

pub use clipboard::{clipboard_to_entries, parse_partial_json, PasteResult};
pub use document_state::{next_keys, DocumentState, KeyOrder};
pub use error::EditError;
pub use immutable::{delete_in, get_in, set_in, update_in};
pub use json_patch::{apply_op, apply_patch, Op, PatchError};
pub use operations::{
    create_new_value, remove, remove_all, Entry, NewValueKind, PatchSynthesizer, ReorderStrategy,
    SynthesizerOptions,
};
pub use selection::{selection_from_operations, Selection};
pub use unique_name::{find_unique_name, CopySuffix, NameResolver};
pub use value::{JsonValue, ObjectMap};
