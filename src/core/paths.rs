//! Path handling for navigation targets.
//!
//! Paths are kept as the backend's `/`-separated strings. Normalization only collapses
//! repeated separators and drops a trailing one; `.` and `..` segments are left alone
//! because folder names are opaque segments here.

/// Name of the synthetic parent-directory entry
pub const PARENT_ENTRY: &str = "..";

const SEPARATOR: char = '/';

/// Collapse repeated separators and strip a trailing separator (except for `/` itself).
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut last_was_sep = false;

    for ch in path.chars() {
        if ch == SEPARATOR {
            if !last_was_sep {
                out.push(ch);
            }
            last_was_sep = true;
        } else {
            out.push(ch);
            last_was_sep = false;
        }
    }

    if out.len() > 1 && out.ends_with(SEPARATOR) {
        out.pop();
    }
    out
}

/// Resolve a child entry name against its parent directory.
pub fn join(parent: &str, name: &str) -> String {
    normalize(&format!("{parent}{SEPARATOR}{name}"))
}

/// True when `name` can stand as a single entry name inside a directory
pub fn is_valid_entry_name(name: &str) -> bool {
    !name.is_empty() && name != PARENT_ENTRY && name != "." && !name.contains(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize("/repo//sub///deep"), "/repo/sub/deep");
        assert_eq!(normalize("//"), "/");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn test_normalize_strips_trailing_separator() {
        assert_eq!(normalize("/repo/"), "/repo");
        assert_eq!(normalize("/C:/"), "/C:");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/repo", "sub"), "/repo/sub");
        assert_eq!(join("/repo/", "sub"), "/repo/sub");
        assert_eq!(join("/", "repo"), "/repo");
    }

    #[test]
    fn test_join_keeps_dot_segments_opaque() {
        assert_eq!(join("/repo", ".config"), "/repo/.config");
        assert_eq!(join("/repo", "a..b"), "/repo/a..b");
    }

    #[test]
    fn test_valid_entry_names() {
        assert!(is_valid_entry_name("b.txt"));
        assert!(is_valid_entry_name(".gitignore"));
        assert!(!is_valid_entry_name(""));
        assert!(!is_valid_entry_name(".."));
        assert!(!is_valid_entry_name("."));
        assert!(!is_valid_entry_name("sub/b.txt"));
    }
}
