//! Extension inference and the partial-file naming convention.

use super::trace::add_tried;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use stylepath_util::fs;
use tracing::trace;

/// Recognized stylesheet extensions, in priority order.
pub const STYLE_EXTENSIONS: &[&str] = &["scss", "sass", "css"];

/// Leading marker of a partial file (`_config.scss` is imported as `config`).
pub const PARTIAL_MARKER: char = '_';

/// Find the on-disk file a base path refers to.
///
/// Tries, in order: the path itself if it already carries one of
/// `extensions`, then the path with each extension appended. If neither
/// matches and the file name is not already a partial, the extensions are
/// appended to the partial form of the path. Non-partial files always win.
#[must_use]
pub fn find_file(base: &Path, extensions: &[&str]) -> Option<PathBuf> {
    let mut tried = Vec::new();
    find_file_tracked(base, extensions, &mut tried)
}

/// [`find_file`], recording every probed path into `tried`.
pub(crate) fn find_file_tracked(
    base: &Path,
    extensions: &[&str],
    tried: &mut Vec<PathBuf>,
) -> Option<PathBuf> {
    if has_extension(base, extensions) {
        add_tried(tried, base);
        if fs::exists(&[base]) {
            trace!(path = %base.display(), "matched explicit extension");
            return Some(base.to_path_buf());
        }
    }

    if let Some(found) = append_each(base, extensions, tried) {
        return Some(found);
    }

    // The partial form only gets the appended extensions, never an exact check.
    let partial = partial_path(base)?;
    append_each(&partial, extensions, tried)
}

fn append_each(base: &Path, extensions: &[&str], tried: &mut Vec<PathBuf>) -> Option<PathBuf> {
    for ext in extensions {
        let candidate = append_extension(base, ext);
        add_tried(tried, &candidate);
        if fs::exists(&[&candidate]) {
            trace!(path = %candidate.display(), "matched inferred extension");
            return Some(candidate);
        }
    }

    None
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e))
}

/// Append `.ext` to the full path, keeping any existing extension.
fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// The partial form of `base`: the marker inserted before the file name.
///
/// Returns `None` if there is no file name or it is already a partial.
fn partial_path(base: &Path) -> Option<PathBuf> {
    let name = base.file_name()?;
    if name.to_string_lossy().starts_with(PARTIAL_MARKER) {
        return None;
    }

    let mut partial = OsString::from(PARTIAL_MARKER.to_string());
    partial.push(name);
    Some(base.with_file_name(partial))
}
