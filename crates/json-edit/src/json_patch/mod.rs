//! JSON Patch (RFC 6902) documents.
//!
//! Only the structural operations are modelled: `add`, `remove`,
//! `replace`, `move` and `copy`. Operations apply strictly in order, and a
//! later operation may rely on index shifts caused by an earlier one.

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_op, apply_patch};
pub use codec::{from_json, from_json_patch, to_json, to_json_patch};
pub use types::{Op, PatchError};
