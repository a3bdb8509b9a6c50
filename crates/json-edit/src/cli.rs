//! Command-line front end for the `json-edit` binary.
//!
//! The binary reads a document from stdin, runs one subcommand against it
//! and prints JSON to stdout:
//!
//! - `paste <selection> <clipboard-text>`: the patch and the selection to
//!   show after it is applied
//! - `remove <pointer>...`: the patch
//! - `duplicate <pointer>...`: the patch
//! - `new <kind> <selection>`: the seed value for a new node
//! - `apply <patch-json>`: the patched document
//!
//! Selections are written `value:<ptr>`, `key:<ptr>`, `before:<ptr>`,
//! `append:<ptr>` or `paths:<ptr>,<ptr>,...`. `--legacy-order` switches the
//! key reordering to [`ReorderStrategy::TrailingKeys`].

use json_edit_pointer::{format_json_pointer, try_parse_json_pointer, JsonPointerError, Path};
use serde_json::{json, Value};
use thiserror::Error;

use crate::clipboard::PasteResult;
use crate::error::EditError;
use crate::json_patch::{apply_patch, from_json_patch, to_json_patch, PatchError};
use crate::operations::{
    create_new_value, remove_all, NewValueKind, PatchSynthesizer, ReorderStrategy,
    SynthesizerOptions,
};
use crate::selection::Selection;
use crate::value::JsonValue;

pub const USAGE: &str = "\
usage: json-edit [--legacy-order] <command> [args...] < document.json

commands:
  paste <selection> <clipboard-text>
  remove <pointer>...
  duplicate <pointer>...
  new <value|object|array|structure> <selection>
  apply <patch-json>

selections: value:<ptr> key:<ptr> before:<ptr> append:<ptr> paths:<ptr>,<ptr>,...";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid pointer {pointer:?}: {source}")]
    Pointer {
        pointer: String,
        source: JsonPointerError,
    },
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("patch failed: {0}")]
    Patch(#[from] PatchError),
    #[error("invalid selection {0:?}")]
    Selection(String),
    /// The arguments do not form a command; print [`USAGE`] with it.
    #[error("{0}")]
    Usage(String),
}

// ── Arguments ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Paste {
        selection: Selection,
        clipboard: String,
    },
    Remove(Vec<Path>),
    Duplicate(Vec<Path>),
    New {
        kind: NewValueKind,
        selection: Selection,
    },
    Apply(String),
}

/// Parse the arguments that follow the program name.
pub fn parse_args(args: &[String]) -> Result<(SynthesizerOptions, Command), CliError> {
    let mut options = SynthesizerOptions::default();
    let mut rest = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--legacy-order" => options.reorder = ReorderStrategy::TrailingKeys,
            _ => rest.push(arg.as_str()),
        }
    }

    let command = match rest.as_slice() {
        ["paste", selection, clipboard] => Command::Paste {
            selection: parse_selection(selection)?,
            clipboard: clipboard.to_string(),
        },
        ["remove", pointers @ ..] if !pointers.is_empty() => {
            Command::Remove(parse_pointers(pointers.iter().copied())?)
        }
        ["duplicate", pointers @ ..] if !pointers.is_empty() => {
            Command::Duplicate(parse_pointers(pointers.iter().copied())?)
        }
        ["new", kind, selection] => Command::New {
            kind: kind.parse()?,
            selection: parse_selection(selection)?,
        },
        ["apply", patch] => Command::Apply(patch.to_string()),
        [] => return Err(CliError::Usage("missing command".to_string())),
        [command, ..] => {
            return Err(CliError::Usage(format!(
                "unknown command or wrong arguments for {command:?}"
            )))
        }
    };
    Ok((options, command))
}

/// Parse a selection written as `<kind>:<pointer>`.
pub fn parse_selection(text: &str) -> Result<Selection, CliError> {
    let (kind, target) = text
        .split_once(':')
        .ok_or_else(|| CliError::Selection(text.to_string()))?;
    let selection = match kind {
        "value" => Selection::Value(parse_pointer(target)?),
        "key" => Selection::Key(parse_pointer(target)?),
        "before" => Selection::Before(parse_pointer(target)?),
        "append" => Selection::Append(parse_pointer(target)?),
        "paths" => Selection::Multi(parse_pointers(target.split(','))?),
        _ => return Err(CliError::Selection(text.to_string())),
    };
    Ok(selection)
}

fn parse_pointer(pointer: &str) -> Result<Path, CliError> {
    try_parse_json_pointer(pointer).map_err(|source| CliError::Pointer {
        pointer: pointer.to_string(),
        source,
    })
}

fn parse_pointers<'a>(pointers: impl Iterator<Item = &'a str>) -> Result<Vec<Path>, CliError> {
    pointers.map(parse_pointer).collect()
}

// ── Running ───────────────────────────────────────────────────────────────

/// Run `command` against the document text and return the JSON to print.
pub fn run(
    document: &str,
    options: SynthesizerOptions,
    command: &Command,
) -> Result<String, CliError> {
    let doc = JsonValue::parse(document)?;
    let synth = PatchSynthesizer::new().with_options(options);

    let output = match command {
        Command::Paste {
            selection,
            clipboard,
        } => {
            let result = synth.create_paste_operations(&doc, &doc, selection, clipboard)?;
            paste_result_to_json(&result)
        }
        Command::Remove(paths) => to_json_patch(&remove_all(paths)),
        Command::Duplicate(paths) => to_json_patch(&synth.duplicate(&doc, &doc, paths)?),
        Command::New { kind, selection } => Value::from(create_new_value(&doc, selection, *kind)),
        Command::Apply(patch) => {
            let patch: Value = serde_json::from_str(patch)?;
            let ops = from_json_patch(&patch)?;
            Value::from(apply_patch(&doc, &ops)?)
        }
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

pub fn paste_result_to_json(result: &PasteResult) -> Value {
    json!({
        "operations": to_json_patch(&result.operations),
        "selection": selection_to_json(&result.selection),
    })
}

pub fn selection_to_json(selection: &Selection) -> Value {
    let (kind, path) = match selection {
        Selection::Value(path) => ("value", path),
        Selection::Key(path) => ("key", path),
        Selection::Before(path) => ("before", path),
        Selection::Append(path) => ("append", path),
        Selection::Multi(paths) => {
            let paths: Vec<String> = paths.iter().map(|p| format_json_pointer(p)).collect();
            return json!({ "kind": "paths", "paths": paths });
        }
    };
    json!({ "kind": kind, "path": format_json_pointer(path) })
}
