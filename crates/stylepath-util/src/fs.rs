use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Join an ordered sequence of path segments into a single path.
///
/// An absolute segment replaces everything joined before it, matching
/// [`Path::join`].
pub fn join_segments<S: AsRef<Path>>(segments: &[S]) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in segments {
        path.push(segment);
    }
    path
}

/// Check whether the path built from `segments` exists (file, directory, or
/// anything else the OS reports).
pub fn exists<S: AsRef<Path>>(segments: &[S]) -> bool {
    join_segments(segments).exists()
}

/// Check whether the path built from `segments` is a directory.
///
/// Unlike [`Path::is_dir`], a missing path is not reported as `false`: the
/// metadata error is returned instead. Call [`exists`] first.
///
/// # Errors
/// Returns the underlying I/O error (usually `NotFound`) if the path's
/// metadata cannot be read.
pub fn is_directory<S: AsRef<Path>>(segments: &[S]) -> io::Result<bool> {
    let meta = fs::metadata(join_segments(segments))?;
    Ok(meta.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_join_segments_in_order() {
        let joined = join_segments(&["a", "b", "c.scss"]);
        assert_eq!(joined, Path::new("a").join("b").join("c.scss"));
    }

    #[test]
    fn test_join_segments_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(join_segments(&empty), PathBuf::new());
    }

    #[test]
    fn test_exists_file_and_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.scss"), "").unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();

        assert!(exists(&[dir.path(), Path::new("a.scss")]));
        assert!(exists(&[dir.path(), Path::new("pkg")]));
        assert!(!exists(&[dir.path(), Path::new("missing")]));
    }

    #[test]
    fn test_is_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.scss"), "").unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();

        assert!(is_directory(&[dir.path(), Path::new("pkg")]).unwrap());
        assert!(!is_directory(&[dir.path(), Path::new("a.scss")]).unwrap());
    }

    #[test]
    fn test_is_directory_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let err = is_directory(&[dir.path(), Path::new("missing")]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
