//! JSON codec for JSON Patch operations.
//!
//! Converts operations to/from `serde_json::Value` in RFC 6902 format.

use json_edit_pointer::{format_json_pointer, try_parse_json_pointer, Path, PathStep};
use serde_json::{json, Value};

use super::types::{Op, PatchError};
use crate::value::JsonValue;

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &[PathStep]) -> Value {
    Value::String(format_json_pointer(path))
}

fn decode_path(op: &Value, field: &str) -> Result<Path, PatchError> {
    let pointer = op
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp(format!("{field} must be a string")))?;
    try_parse_json_pointer(pointer)
        .map_err(|e| PatchError::InvalidOp(format!("{field}: {e}")))
}

fn decode_value(op: &Value) -> Result<JsonValue, PatchError> {
    op.get("value")
        .cloned()
        .map(JsonValue::from)
        .ok_or_else(|| PatchError::InvalidOp("value is missing".into()))
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to a `serde_json::Value`.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": encode_path(path),
            "value": Value::from(value)
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": encode_path(path)
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": encode_path(path),
            "value": Value::from(value)
        }),
        Op::Copy { from, path } => json!({
            "op": "copy",
            "from": encode_path(from),
            "path": encode_path(path)
        }),
        Op::Move { from, path } => json!({
            "op": "move",
            "from": encode_path(from),
            "path": encode_path(path)
        }),
    }
}

/// Serialize a patch document to a JSON array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Deserialize a single operation.
pub fn from_json(op: &Value) -> Result<Op, PatchError> {
    let name = op
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("op must be a string".into()))?;
    match name {
        "add" => Ok(Op::Add {
            path: decode_path(op, "path")?,
            value: decode_value(op)?,
        }),
        "remove" => Ok(Op::Remove {
            path: decode_path(op, "path")?,
        }),
        "replace" => Ok(Op::Replace {
            path: decode_path(op, "path")?,
            value: decode_value(op)?,
        }),
        "copy" => Ok(Op::Copy {
            from: decode_path(op, "from")?,
            path: decode_path(op, "path")?,
        }),
        "move" => Ok(Op::Move {
            from: decode_path(op, "from")?,
            path: decode_path(op, "path")?,
        }),
        other => Err(PatchError::InvalidOp(format!("unsupported op: {other}"))),
    }
}

/// Deserialize a patch document from a JSON array.
pub fn from_json_patch(patch: &Value) -> Result<Vec<Op>, PatchError> {
    let ops = patch
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?;
    ops.iter().map(from_json).collect()
}
