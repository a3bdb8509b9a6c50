//! JSON Pointer (RFC 6901) utilities.
//!
//! Paths are sequences of [`PathStep`]s: object member names or array
//! indices. This crate converts between paths and pointer strings and
//! answers simple structural questions about paths.
//!
//! # Example
//!
//! ```
//! use json_edit_pointer::{format_json_pointer, parse_json_pointer, path};
//!
//! let p = path!["foo", 0, "a/b"];
//! assert_eq!(format_json_pointer(&p), "/foo/0/a~1b");
//! assert_eq!(parse_json_pointer("/foo/0/a~1b"), p);
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep};

pub mod validate;
pub use validate::validate_json_pointer;

/// Decode one pointer component: `~1` becomes `/`, then `~0` becomes `~`.
///
/// ```
/// use json_edit_pointer::unescape_component;
///
/// assert_eq!(unescape_component("price~1kg"), "price/kg");
/// assert_eq!(unescape_component("~01"), "~1");
/// assert_eq!(unescape_component("plain"), "plain");
/// ```
pub fn unescape_component(component: &str) -> String {
    match component.contains('~') {
        true => component.replace("~1", "/").replace("~0", "~"),
        false => component.to_owned(),
    }
}

/// Encode a member name for use as a pointer component, the inverse of
/// [`unescape_component`].
///
/// ```
/// use json_edit_pointer::escape_component;
///
/// assert_eq!(escape_component("price/kg"), "price~1kg");
/// assert_eq!(escape_component("~1"), "~01");
/// assert_eq!(escape_component("plain"), "plain");
/// ```
pub fn escape_component(component: &str) -> String {
    match component.contains(['~', '/']) {
        true => component.replace('~', "~0").replace('/', "~1"),
        false => component.to_owned(),
    }
}

/// Parse a JSON Pointer string into a path.
///
/// Every step comes back as [`PathStep::Key`]; whether a step addresses an
/// array element is only known once it meets a document. An empty string is
/// the root path, and the leading `/` is stripped.
///
/// # Example
///
/// ```
/// use json_edit_pointer::{parse_json_pointer, path};
///
/// assert!(parse_json_pointer("").is_empty());
/// assert_eq!(parse_json_pointer("/"), path![""]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d"), path!["a~b", "c/d"]);
/// ```
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/')
        .map(|component| PathStep::Key(unescape_component(component)))
        .collect()
}

/// Validate and parse a JSON Pointer string.
pub fn try_parse_json_pointer(pointer: &str) -> Result<Path, JsonPointerError> {
    validate_json_pointer(pointer)?;
    Ok(parse_json_pointer(pointer))
}

/// Format a path into a JSON Pointer string.
///
/// Returns an empty string for the root path.
///
/// # Example
///
/// ```
/// use json_edit_pointer::{format_json_pointer, path};
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&path!["foo", 3]), "/foo/3");
/// ```
pub fn format_json_pointer(path: &[PathStep]) -> String {
    let mut out = String::with_capacity(path.len() * 8);
    for step in path {
        out.push('/');
        out.push_str(&escape_component(&step.as_str()));
    }
    out
}

/// `true` for the empty path, which addresses the whole document.
pub fn is_root(path: &[PathStep]) -> bool {
    path.is_empty()
}

/// Check if `parent` is a proper ancestor of `child`.
///
/// # Example
///
/// ```
/// use json_edit_pointer::{is_child, path};
///
/// assert!(is_child(&path!["foo"], &path!["foo", "bar"]));
/// assert!(!is_child(&path!["foo"], &path!["foo"]));
/// ```
pub fn is_child(parent: &[PathStep], child: &[PathStep]) -> bool {
    parent.len() < child.len() && child[..parent.len()] == *parent
}

/// The path without its last step. The root has no parent.
pub fn parent(path: &[PathStep]) -> Result<Path, JsonPointerError> {
    path.split_last()
        .map(|(_, init)| init.to_vec())
        .ok_or(JsonPointerError::NoParent)
}

/// Whether `index` is written as an array index: decimal digits with no
/// sign and no leading zero.
///
/// ```
/// use json_edit_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("42"));
/// assert!(!is_valid_index("007"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    match index.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        digits => digits.iter().all(u8::is_ascii_digit),
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("NO_PARENT")]
    NoParent,
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
}
