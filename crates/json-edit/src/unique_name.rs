//! Collision-free member names.

use std::collections::HashSet;

/// Picks a key that does not collide with any sibling.
pub trait NameResolver {
    fn find_unique_name(&self, desired: &str, siblings: &HashSet<String>) -> String;
}

/// Suffixes colliding names: `name`, `name (copy)`, `name (copy 2)`, ...
#[derive(Debug, Clone, Copy, Default)]
pub struct CopySuffix;

impl NameResolver for CopySuffix {
    fn find_unique_name(&self, desired: &str, siblings: &HashSet<String>) -> String {
        let mut candidate = desired.to_string();
        let mut attempt = 1;
        while siblings.contains(&candidate) {
            candidate = if attempt == 1 {
                format!("{desired} (copy)")
            } else {
                format!("{desired} (copy {attempt})")
            };
            attempt += 1;
        }
        candidate
    }
}

/// [`CopySuffix`] as a plain function.
pub fn find_unique_name(desired: &str, siblings: &HashSet<String>) -> String {
    CopySuffix.find_unique_name(desired, siblings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn free_name_is_kept() {
        assert_eq!(find_unique_name("name", &set(&["other"])), "name");
    }

    #[test]
    fn colliding_names_get_copy_suffixes() {
        assert_eq!(find_unique_name("name", &set(&["name"])), "name (copy)");
        assert_eq!(
            find_unique_name("name", &set(&["name", "name (copy)"])),
            "name (copy 2)"
        );
        assert_eq!(
            find_unique_name("name", &set(&["name", "name (copy)", "name (copy 2)"])),
            "name (copy 3)"
        );
    }
}
