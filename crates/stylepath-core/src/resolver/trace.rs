//! Resolution tracing for `stylepath resolve --explain`.
//!
//! Records which fallback steps ran against a root, whether each matched,
//! and the candidate paths probed along the way.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Maximum number of tried paths to record.
pub const MAX_TRIED_PATHS: usize = 40;

/// A single step in the resolution trace.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveTraceStep {
    /// Step name, one of [`steps`].
    pub step: &'static str,
    /// Whether this step produced a match.
    pub ok: bool,
    /// Human-readable description of what happened.
    pub detail: String,
    /// File path involved in this step, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ResolveTraceStep {
    /// Create a new trace step.
    pub fn new(step: &'static str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            step,
            ok,
            detail: detail.into(),
            path: None,
        }
    }

    /// Set the path for this step.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Trace of resolving one specifier against one root.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveTrace {
    /// Ordered list of resolution steps.
    pub steps: Vec<ResolveTraceStep>,
    /// Candidate paths probed (capped at [`MAX_TRIED_PATHS`]).
    pub tried: Vec<PathBuf>,
}

impl ResolveTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: ResolveTraceStep) {
        self.steps.push(step);
    }

    /// Add a step that matched `path`.
    pub fn success(&mut self, step: &'static str, detail: impl Into<String>, path: &Path) {
        self.steps
            .push(ResolveTraceStep::new(step, true, detail).with_path(path));
    }

    /// Add a step that did not match.
    pub fn failure(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, false, detail));
    }

    /// The step that produced the match, if any.
    #[must_use]
    pub fn matched_step(&self) -> Option<&ResolveTraceStep> {
        self.steps.iter().find(|s| s.ok)
    }
}

/// Step names used in resolution tracing.
pub mod steps {
    pub const CHECK_ROOT: &str = "check_root";
    pub const DIRECTORY_INDEX: &str = "directory_index";
    pub const MANIFEST_ENTRY: &str = "manifest_entry";
    pub const EXACT_FILE: &str = "exact_file";
    pub const INFERRED: &str = "inferred";
    pub const PACKAGE_RELATIVE: &str = "package_relative";
}

/// Add a path to the tried list (with cap).
pub(crate) fn add_tried(tried: &mut Vec<PathBuf>, path: &Path) {
    if tried.len() < MAX_TRIED_PATHS {
        tried.push(path.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matched_step() {
        let mut trace = ResolveTrace::new();
        trace.failure(steps::DIRECTORY_INDEX, "not a directory");
        trace.success(steps::INFERRED, "found", Path::new("/r/_a.scss"));

        let matched = trace.matched_step().unwrap();
        assert_eq!(matched.step, steps::INFERRED);
        assert_eq!(matched.path.as_deref(), Some(Path::new("/r/_a.scss")));
    }

    #[test]
    fn test_tried_is_capped() {
        let mut tried = Vec::new();
        for i in 0..MAX_TRIED_PATHS + 5 {
            add_tried(&mut tried, Path::new(&format!("/r/{i}")));
        }
        assert_eq!(tried.len(), MAX_TRIED_PATHS);
    }

    #[test]
    fn test_serialize_skips_missing_path() {
        let step = ResolveTraceStep::new(steps::EXACT_FILE, false, "missing");
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["step"], "exact_file");
        assert!(json.get("path").is_none());
    }
}
