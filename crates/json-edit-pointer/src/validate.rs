//! Pointer syntax checks.

use crate::JsonPointerError;

/// Pointers longer than this many bytes are refused.
pub const MAX_POINTER_LENGTH: usize = 1024;

/// Check that `pointer` is a well-formed JSON Pointer.
///
/// The empty string (the root) is accepted. Anything else must start with
/// `/`, stay within [`MAX_POINTER_LENGTH`] bytes and use `~` only in the
/// escapes `~0` and `~1`.
///
/// ```
/// use json_edit_pointer::{validate_json_pointer, JsonPointerError};
///
/// assert_eq!(validate_json_pointer(""), Ok(()));
/// assert_eq!(validate_json_pointer("/list/0"), Ok(()));
/// assert_eq!(validate_json_pointer("list"), Err(JsonPointerError::PointerInvalid));
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), JsonPointerError> {
    let Some(body) = pointer.strip_prefix('/') else {
        return match pointer {
            "" => Ok(()),
            _ => Err(JsonPointerError::PointerInvalid),
        };
    };
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(JsonPointerError::PointerTooLong);
    }
    let bad_escape = body
        .split('~')
        .skip(1)
        .any(|rest| !(rest.starts_with('0') || rest.starts_with('1')));
    if bad_escape {
        return Err(JsonPointerError::PointerInvalid);
    }
    Ok(())
}
