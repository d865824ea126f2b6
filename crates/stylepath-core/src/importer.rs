//! Multi-root dispatch: try every include path in order.

use crate::config::IncludePaths;
use crate::error::{Error, Result};
use crate::resolver::{resolve, resolve_with_trace, ResolveTrace};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use url::Url;

/// Schema version for the explain output format.
/// Bump when the structure changes incompatibly.
pub const EXPLAIN_SCHEMA_VERSION: u32 = 1;

/// Resolves specifiers against an ordered list of include paths.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Importer {
    include_paths: IncludePaths,
    base_dir: PathBuf,
}

impl Importer {
    /// Create an importer. Relative include paths are joined onto `base_dir`.
    pub fn new(include_paths: impl Into<IncludePaths>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            include_paths: include_paths.into(),
            base_dir: base_dir.into(),
        }
    }

    /// Create an importer from a loosely typed include path value.
    ///
    /// # Errors
    /// Fails with a configuration error if `value` is `null`, or is neither a
    /// path string nor an array of path strings.
    pub fn from_value(value: &Value, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let include_paths = IncludePaths::from_value(value)?;
        Ok(Self::new(include_paths, base_dir))
    }

    #[must_use]
    pub fn include_paths(&self) -> &IncludePaths {
        &self.include_paths
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Include paths joined onto the base directory, in search order.
    pub fn roots(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.include_paths
            .as_slice()
            .iter()
            .map(|p| self.base_dir.join(p))
    }

    /// Resolve `spec` to a file path using the first include path that has it.
    pub fn find_file(&self, spec: &str) -> Result<Option<PathBuf>> {
        for root in self.roots() {
            if let Some(found) = resolve(spec, &root)? {
                debug!(spec, root = %root.display(), path = %found.display(), "found");
                return Ok(Some(found));
            }
            trace!(spec, root = %root.display(), "no match under root");
        }
        debug!(spec, "no include path matched");
        Ok(None)
    }

    /// Resolve `spec` to a `file:` URL. `Ok(None)` means no include path had it.
    pub fn find_file_url(&self, spec: &str) -> Result<Option<Url>> {
        self.find_file(spec)?.map(|path| file_url(&path)).transpose()
    }

    /// Resolve `spec` and report how each include path was searched.
    ///
    /// Stops after the first include path that resolves.
    pub fn explain(&self, spec: &str) -> Result<Explanation> {
        let mut explanation = Explanation {
            schema_version: EXPLAIN_SCHEMA_VERSION,
            specifier: spec.to_string(),
            resolved: None,
            url: None,
            roots: Vec::new(),
        };

        for root in self.roots() {
            let result = resolve_with_trace(spec, &root)?;
            explanation.roots.push(RootTrace {
                root,
                resolved: result.resolved.clone(),
                trace: result.trace,
            });

            if let Some(found) = result.resolved {
                explanation.url = Some(file_url(&found)?.to_string());
                explanation.resolved = Some(found);
                break;
            }
        }

        Ok(explanation)
    }
}

/// Express an absolute path as a `file:` URL.
pub fn file_url(path: &Path) -> Result<Url> {
    Url::from_file_path(path).map_err(|()| Error::InvalidUrl {
        path: path.to_path_buf(),
    })
}

/// How one include path was searched.
#[derive(Debug, Clone, Serialize)]
pub struct RootTrace {
    pub root: PathBuf,
    pub resolved: Option<PathBuf>,
    pub trace: ResolveTrace,
}

/// Result of [`Importer::explain`].
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub schema_version: u32,
    pub specifier: String,
    pub resolved: Option<PathBuf>,
    pub url: Option<String>,
    pub roots: Vec<RootTrace>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::resolver::trace_steps;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    fn canonical(path: &Path) -> PathBuf {
        dunce::canonicalize(path).unwrap()
    }

    #[test]
    fn test_first_root_wins() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a/theme.scss"));
        touch(&dir.path().join("b/theme.scss"));

        let importer = Importer::new(
            vec![PathBuf::from("a"), PathBuf::from("b")],
            dir.path(),
        );
        assert_eq!(
            importer.find_file("theme").unwrap(),
            Some(canonical(dir.path()).join("a/theme.scss"))
        );
    }

    #[test]
    fn test_falls_through_to_later_root() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        touch(&dir.path().join("b/_theme.scss"));

        let importer = Importer::new(
            vec![PathBuf::from("missing"), PathBuf::from("a"), PathBuf::from("b")],
            dir.path(),
        );
        assert_eq!(
            importer.find_file("theme").unwrap(),
            Some(canonical(dir.path()).join("b/_theme.scss"))
        );
    }

    #[test]
    fn test_absolute_root_ignores_base_dir() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("lib/x.css"));

        let importer = Importer::new(dir.path().join("lib"), "/does/not/matter");
        assert!(importer.find_file("x").unwrap().is_some());
    }

    #[test]
    fn test_find_file_url() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("pkg/index.scss"));

        let importer = Importer::new(dir.path().to_path_buf(), dir.path());
        let url = importer.find_file_url("pkg").unwrap().unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(
            url.to_file_path().unwrap(),
            canonical(dir.path()).join("pkg/index.scss")
        );
    }

    #[test]
    fn test_find_file_url_with_relative_base_dir() {
        let dir = tempfile::Builder::new()
            .prefix("stylepath-url")
            .tempdir_in(".")
            .unwrap();
        touch(&dir.path().join("lib/_grid.scss"));

        let name = PathBuf::from(dir.path().file_name().unwrap());
        let importer = Importer::new(name.join("lib"), ".");
        let url = importer.find_file_url("grid").unwrap().unwrap();
        assert_eq!(
            url.to_file_path().unwrap(),
            canonical(dir.path()).join("lib/_grid.scss")
        );
    }

    #[test]
    fn test_no_roots_exist() {
        let dir = tempdir().unwrap();
        let importer = Importer::new(
            vec![PathBuf::from("nope"), PathBuf::from("also-nope")],
            dir.path(),
        );
        assert_eq!(importer.find_file_url("pkg/x").unwrap(), None);
    }

    #[test]
    fn test_empty_root_list() {
        let dir = tempdir().unwrap();
        let importer = Importer::from_value(&json!([]), dir.path()).unwrap();
        assert_eq!(importer.find_file_url("anything").unwrap(), None);
    }

    #[test]
    fn test_from_value_single_string() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("styles/_a.scss"));

        let importer = Importer::from_value(&json!("styles"), dir.path()).unwrap();
        assert_eq!(importer.include_paths().len(), 1);
        assert!(importer.find_file("a").unwrap().is_some());
    }

    #[test]
    fn test_from_value_invalid() {
        let err = Importer::from_value(&json!(7), "/").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidIncludePaths { .. })
        ));

        let err = Importer::from_value(&Value::Null, "/").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingIncludePaths)));
    }

    #[test]
    fn test_malformed_manifest_propagates() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg/package.json"), "not json").unwrap();

        let importer = Importer::new(dir.path().to_path_buf(), dir.path());
        assert!(importer.find_file_url("pkg").is_err());
    }

    #[test]
    fn test_explain_stops_at_first_match() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        touch(&dir.path().join("b/pkg/_config.scss"));
        touch(&dir.path().join("c/pkg/config.scss"));

        let importer = Importer::new(
            vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")],
            dir.path(),
        );
        let explanation = importer.explain("pkg/config").unwrap();

        assert_eq!(explanation.schema_version, EXPLAIN_SCHEMA_VERSION);
        assert_eq!(explanation.roots.len(), 2);
        assert!(explanation.roots[0].resolved.is_none());
        assert_eq!(
            explanation.resolved,
            Some(canonical(dir.path()).join("b/pkg/_config.scss"))
        );
        assert!(explanation.url.as_deref().unwrap().starts_with("file://"));
        assert_eq!(
            explanation.roots[1].trace.matched_step().unwrap().step,
            trace_steps::INFERRED
        );
    }

    #[test]
    fn test_explain_serializes() {
        let dir = tempdir().unwrap();
        let importer = Importer::new(PathBuf::from("missing"), dir.path());
        let json = serde_json::to_value(importer.explain("x").unwrap()).unwrap();

        assert_eq!(json["specifier"], "x");
        assert!(json["resolved"].is_null());
        assert_eq!(json["roots"][0]["trace"]["steps"][0]["step"], "check_root");
    }

    #[test]
    fn test_importer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Importer>();
    }
}
