//! Specifier parsing: package root extraction.
//!
//! Specifiers are URL-like and always use `/` as the separator, regardless of
//! the host platform.

/// Return the package root of a specifier.
///
/// The specifier is split into a directory part and a leaf at the last `/`.
/// The package root is the first directory segment, or the first two when
/// the first is a scope (`@scope/pkg`).
///
/// ```
/// use stylepath_core::resolver::package_root;
///
/// assert_eq!(package_root("@scope/pkg/dir/name"), Some("@scope/pkg"));
/// assert_eq!(package_root("pkg/dir/name"), Some("pkg"));
/// assert_eq!(package_root("pkg"), None);
/// ```
#[must_use]
pub fn package_root(spec: &str) -> Option<&str> {
    let (dir, _leaf) = spec.rsplit_once('/')?;
    if dir.is_empty() {
        return None;
    }

    let mut segments = dir.split('/');
    let first = segments.next()?;
    if first.is_empty() {
        return None;
    }

    if first.starts_with('@') {
        if let Some(second) = segments.next().filter(|s| !s.is_empty()) {
            return Some(&dir[..first.len() + 1 + second.len()]);
        }
    }

    Some(first)
}

/// Remove `root` (as returned by [`package_root`]) from the front of `spec`.
///
/// The separators following the root are removed too, so the result is a
/// relative sub-path. Returns `None` if `spec` does not start with `root`
/// followed by `/`, or if nothing is left after the root.
#[must_use]
pub fn strip_package_root<'a>(spec: &'a str, root: &str) -> Option<&'a str> {
    let rest = spec.strip_prefix(root)?;
    if !rest.starts_with('/') {
        return None;
    }
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_root_simple() {
        assert_eq!(package_root("pkg/dir/name"), Some("pkg"));
        assert_eq!(package_root("pkg/name"), Some("pkg"));
    }

    #[test]
    fn test_package_root_scoped() {
        assert_eq!(package_root("@scope/pkg/dir/name"), Some("@scope/pkg"));
        assert_eq!(package_root("@scope/pkg/name"), Some("@scope/pkg"));
    }

    #[test]
    fn test_package_root_scope_without_package_segment() {
        // Only one directory segment: the scope itself is the root.
        assert_eq!(package_root("@scope/pkg"), Some("@scope"));
    }

    #[test]
    fn test_package_root_bare_name() {
        assert_eq!(package_root("pkg"), None);
        assert_eq!(package_root("@scope"), None);
    }

    #[test]
    fn test_package_root_empty() {
        assert_eq!(package_root(""), None);
        assert_eq!(package_root("/name"), None);
    }

    #[test]
    fn test_strip_package_root() {
        assert_eq!(strip_package_root("pkg/core/util", "pkg"), Some("core/util"));
        assert_eq!(
            strip_package_root("@scope/pkg/core/util", "@scope/pkg"),
            Some("core/util")
        );
    }

    #[test]
    fn test_strip_package_root_collapses_separators() {
        assert_eq!(strip_package_root("pkg//util", "pkg"), Some("util"));
    }

    #[test]
    fn test_strip_package_root_empty_remainder() {
        assert_eq!(strip_package_root("pkg/", "pkg"), None);
        assert_eq!(strip_package_root("pkg", "pkg"), None);
    }

    #[test]
    fn test_strip_package_root_requires_separator() {
        // "pkgs/util" starts with "pkg" as a string but not as a segment.
        assert_eq!(strip_package_root("pkgs/util", "pkg"), None);
        assert_eq!(strip_package_root("other/util", "pkg"), None);
    }
}
