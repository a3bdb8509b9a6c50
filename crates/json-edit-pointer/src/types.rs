//! Type definitions for JSON Pointer paths.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::is_valid_index;

/// A step in a JSON Pointer path.
///
/// Either an object member name or an array index. Steps compare by their
/// pointer text, so `Key("2")` and `Index(2)` are equal: a step parsed out
/// of a pointer string names the same location as one built from an index.
#[derive(Debug, Clone)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

/// A JSON Pointer path.
pub type Path = Vec<PathStep>;

impl PathStep {
    /// The unescaped text of the step.
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            PathStep::Key(key) => Cow::Borrowed(key),
            PathStep::Index(index) => Cow::Owned(index.to_string()),
        }
    }

    /// Reads the step as an array index.
    ///
    /// Keys are accepted when they are canonical decimal integers (`"0"`,
    /// `"17"`, but not `"01"` or `"-1"`).
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Index(index) => Some(*index),
            PathStep::Key(key) if is_valid_index(key) => key.parse().ok(),
            PathStep::Key(_) => None,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathStep::Index(_))
    }
}

impl PartialEq for PathStep {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathStep::Index(a), PathStep::Index(b)) => a == b,
            (PathStep::Key(a), PathStep::Key(b)) => a == b,
            _ => self.as_str() == other.as_str(),
        }
    }
}

impl Eq for PathStep {}

impl Hash for PathStep {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => f.write_str(key),
            PathStep::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<&String> for PathStep {
    fn from(key: &String) -> Self {
        PathStep::Key(key.clone())
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

/// Builds a [`Path`] from a list of keys and indices.
///
/// ```
/// use json_edit_pointer::{path, PathStep};
///
/// let p = path!["items", 2, "name"];
/// assert_eq!(p[1], PathStep::Index(2));
/// ```
#[macro_export]
macro_rules! path {
    () => { $crate::Path::new() };
    ($($step:expr),+ $(,)?) => {
        vec![$($crate::PathStep::from($step)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn key_and_index_with_same_text_are_equal() {
        assert_eq!(PathStep::Key("3".into()), PathStep::Index(3));
        assert_ne!(PathStep::Key("03".into()), PathStep::Index(3));

        let mut set = HashSet::new();
        set.insert(PathStep::Index(3));
        assert!(set.contains(&PathStep::Key("3".into())));
    }

    #[test]
    fn as_index_accepts_canonical_integers_only() {
        assert_eq!(PathStep::Key("12".into()).as_index(), Some(12));
        assert_eq!(PathStep::Key("012".into()).as_index(), None);
        assert_eq!(PathStep::Key("-".into()).as_index(), None);
        assert_eq!(PathStep::Index(0).as_index(), Some(0));
    }

    #[test]
    fn path_macro_mixes_keys_and_indices() {
        let p: Path = path!["a", 0, "b"];
        assert_eq!(
            p,
            vec![
                PathStep::Key("a".into()),
                PathStep::Index(0),
                PathStep::Key("b".into())
            ]
        );
        assert!(path![].is_empty());
    }
}
