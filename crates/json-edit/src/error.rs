//! Errors surfaced by the edit core.

use json_edit_pointer::{format_json_pointer, Path};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditError {
    /// `insert` received a selection that is not a before, append, or
    /// multi-path selection.
    #[error("cannot insert: unsupported type of selection")]
    UnsupportedSelection,
    /// Every recovery heuristic failed on the clipboard text.
    #[error("failed to parse partial JSON")]
    ClipboardParse,
    /// An update had to pass through a value that is not a container.
    #[error("path does not exist: {}", format_json_pointer(.path))]
    PathResolution { path: Path },
    /// An array was addressed with a step that is not a usable index.
    #[error("invalid array index at {}", format_json_pointer(.path))]
    InvalidIndex { path: Path },
    /// A multi-path operation received no paths.
    #[error("selection contains no paths")]
    EmptySelection,
    /// A multi-path operation received paths with different parents.
    #[error("selected paths do not share a parent")]
    MixedParents,
    #[error("unknown value kind: {0}")]
    UnknownValueKind(String),
}
