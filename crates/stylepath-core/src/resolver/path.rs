//! Resolution of one specifier against one include path.
//!
//! The fallback chain is an ordered list of [`Step`]s; the first step that
//! produces an existing file wins:
//!
//! 1. `DirectoryIndex`: `<root>/<spec>/index.{scss,sass,css}` (or its partial)
//! 2. `ManifestEntry`: the entry point declared in `<root>/<spec>/package.json`
//! 3. `ExactFile`: `<root>/<spec>` itself
//! 4. `Inferred`: extension and partial inference on `<root>/<spec>`
//! 5. `PackageRelative`: the specifier's sub-path re-rooted at the directory of its
//!    package's declared entry point

use super::extensions::{find_file_tracked, STYLE_EXTENSIONS};
use super::manifest::entry_point;
use super::specifier::{package_root, strip_package_root};
use super::trace::{add_tried, steps, ResolveTrace, ResolveTraceStep};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use stylepath_util::fs;
use tracing::debug;

/// Base name of directory index files.
pub const INDEX_NAME: &str = "index";

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    DirectoryIndex,
    ManifestEntry,
    ExactFile,
    Inferred,
    PackageRelative,
}

impl Step {
    /// All steps, in evaluation order.
    pub const ALL: [Step; 5] = [
        Step::DirectoryIndex,
        Step::ManifestEntry,
        Step::ExactFile,
        Step::Inferred,
        Step::PackageRelative,
    ];

    /// Trace name of this step.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DirectoryIndex => steps::DIRECTORY_INDEX,
            Self::ManifestEntry => steps::MANIFEST_ENTRY,
            Self::ExactFile => steps::EXACT_FILE,
            Self::Inferred => steps::INFERRED,
            Self::PackageRelative => steps::PACKAGE_RELATIVE,
        }
    }

    /// Run this step alone against `candidate`, recording into `trace`.
    pub fn run(
        self,
        candidate: &Candidate<'_>,
        trace: &mut ResolveTrace,
    ) -> Result<Option<PathBuf>> {
        let found = match self {
            Self::DirectoryIndex => directory_index(candidate, trace),
            Self::ManifestEntry => manifest_entry(candidate, trace)?,
            Self::ExactFile => exact_file(candidate, trace),
            Self::Inferred => {
                find_file_tracked(&candidate.path, STYLE_EXTENSIONS, &mut trace.tried)
            }
            Self::PackageRelative => package_relative(candidate, trace)?,
        };

        match &found {
            Some(path) => trace.success(self.name(), "Matched", path),
            // Helpers record their own reason when they bail out early.
            None if trace.steps.last().is_some_and(|s| s.step == self.name()) => {}
            None => trace.failure(self.name(), "No match"),
        }
        Ok(found)
    }
}

/// What `<root>/<spec>` currently is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Missing,
    File,
    Directory,
}

/// A specifier joined onto a root, with its on-disk kind probed once.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    /// The specifier, with leading `/` removed.
    pub spec: &'a str,
    /// The include path.
    pub root: &'a Path,
    /// `root / spec`.
    pub path: PathBuf,
    pub kind: CandidateKind,
}

impl<'a> Candidate<'a> {
    /// Join `spec` onto `root` and probe what it is.
    pub fn new(spec: &'a str, root: &'a Path) -> Result<Self> {
        let spec = spec.trim_start_matches('/');
        let path = root.join(spec);
        let kind = if !fs::exists(&[&path]) {
            CandidateKind::Missing
        } else if fs::is_directory(&[&path]).map_err(|source| Error::Probe {
            path: path.clone(),
            source,
        })? {
            CandidateKind::Directory
        } else {
            CandidateKind::File
        };

        Ok(Self {
            spec,
            root,
            path,
            kind,
        })
    }

    fn is_directory(&self) -> bool {
        self.kind == CandidateKind::Directory
    }
}

/// Result of resolution with trace.
#[derive(Debug, Clone)]
pub struct ResolveResultWithTrace {
    /// The resolved absolute path, if any step matched.
    pub resolved: Option<PathBuf>,
    /// The resolution trace.
    pub trace: ResolveTrace,
}

/// Resolve `spec` against a single include path.
///
/// Returns `Ok(None)` when the root is not an existing directory or no step
/// matched. Errors only on malformed manifests and failed type probes.
pub fn resolve(spec: &str, root: &Path) -> Result<Option<PathBuf>> {
    resolve_with_trace(spec, root).map(|r| r.resolved)
}

/// Resolve `spec` against a single include path, recording each step.
pub fn resolve_with_trace(spec: &str, root: &Path) -> Result<ResolveResultWithTrace> {
    let mut trace = ResolveTrace::new();

    let Some(root) = check_root(root, &mut trace)? else {
        return Ok(ResolveResultWithTrace {
            resolved: None,
            trace,
        });
    };

    if spec.trim_start_matches('/').is_empty() {
        trace.failure(steps::CHECK_ROOT, "Specifier is empty");
        return Ok(ResolveResultWithTrace {
            resolved: None,
            trace,
        });
    }

    let candidate = Candidate::new(spec, &root)?;
    debug!(spec, root = %root.display(), kind = ?candidate.kind, "resolving");

    for step in Step::ALL {
        if let Some(found) = step.run(&candidate, &mut trace)? {
            debug!(spec, step = step.name(), path = %found.display(), "resolved");
            return Ok(ResolveResultWithTrace {
                resolved: Some(found),
                trace,
            });
        }
    }

    Ok(ResolveResultWithTrace {
        resolved: None,
        trace,
    })
}

/// Make sure `root` is an existing directory and return its absolute form.
fn check_root(root: &Path, trace: &mut ResolveTrace) -> Result<Option<PathBuf>> {
    if !fs::exists(&[root]) {
        trace.failure(steps::CHECK_ROOT, format!("{} does not exist", root.display()));
        return Ok(None);
    }

    let is_dir = fs::is_directory(&[root]).map_err(|source| Error::Probe {
        path: root.to_path_buf(),
        source,
    })?;
    if !is_dir {
        trace.failure(steps::CHECK_ROOT, format!("{} is not a directory", root.display()));
        return Ok(None);
    }

    let absolute = dunce::canonicalize(root).map_err(|source| Error::Probe {
        path: root.to_path_buf(),
        source,
    })?;
    trace.add_step(
        ResolveTraceStep::new(steps::CHECK_ROOT, true, "Root is a directory")
            .with_path(&absolute),
    );
    Ok(Some(absolute))
}

fn directory_index(candidate: &Candidate<'_>, trace: &mut ResolveTrace) -> Option<PathBuf> {
    if !candidate.is_directory() {
        trace.failure(steps::DIRECTORY_INDEX, "Not a directory");
        return None;
    }
    find_file_tracked(
        &candidate.path.join(INDEX_NAME),
        STYLE_EXTENSIONS,
        &mut trace.tried,
    )
}

fn manifest_entry(
    candidate: &Candidate<'_>,
    trace: &mut ResolveTrace,
) -> Result<Option<PathBuf>> {
    if !candidate.is_directory() {
        trace.failure(steps::MANIFEST_ENTRY, "Not a directory");
        return Ok(None);
    }

    let Some(entry) = entry_point(&candidate.path)? else {
        trace.failure(steps::MANIFEST_ENTRY, "No manifest entry point");
        return Ok(None);
    };

    let target = candidate.path.join(entry.trim_start_matches("./"));
    add_tried(&mut trace.tried, &target);
    if fs::exists(&[&target]) {
        Ok(Some(target))
    } else {
        trace.failure(
            steps::MANIFEST_ENTRY,
            format!("Entry point {entry} does not exist"),
        );
        Ok(None)
    }
}

fn exact_file(candidate: &Candidate<'_>, trace: &mut ResolveTrace) -> Option<PathBuf> {
    add_tried(&mut trace.tried, &candidate.path);
    (candidate.kind == CandidateKind::File).then(|| candidate.path.clone())
}

fn package_relative(
    candidate: &Candidate<'_>,
    trace: &mut ResolveTrace,
) -> Result<Option<PathBuf>> {
    let Some(pkg_root) = package_root(candidate.spec) else {
        trace.failure(steps::PACKAGE_RELATIVE, "Specifier has no package root");
        return Ok(None);
    };

    let Some(rest) = strip_package_root(candidate.spec, pkg_root) else {
        trace.failure(steps::PACKAGE_RELATIVE, "Nothing follows the package root");
        return Ok(None);
    };

    let pkg_dir = candidate.root.join(pkg_root);
    let Some(entry) = entry_point(&pkg_dir)? else {
        trace.failure(
            steps::PACKAGE_RELATIVE,
            format!("Package {pkg_root} declares no entry point"),
        );
        return Ok(None);
    };

    let entry = entry.trim_start_matches("./");
    let entry_dir = Path::new(entry).parent().unwrap_or(Path::new(""));
    let base = pkg_dir.join(entry_dir).join(rest);
    Ok(find_file_tracked(&base, STYLE_EXTENSIONS, &mut trace.tried))
}
