//! Include-path resolver for stylesheet `@use`/`@import` specifiers.
//!
//! Resolves a specifier against one root directory: directory index files,
//! `package.json` style entry points, extension and partial inference, and
//! package-relative re-resolution.

mod extensions;
mod manifest;
mod path;
mod specifier;
pub mod trace;

pub use extensions::{find_file, PARTIAL_MARKER, STYLE_EXTENSIONS};
pub use manifest::{entry_point, ENTRY_FIELDS, MANIFEST_FILE};
pub use path::{
    resolve, resolve_with_trace, Candidate, CandidateKind, ResolveResultWithTrace, Step,
    INDEX_NAME,
};
pub use specifier::{package_root, strip_package_root};
pub use trace::{steps as trace_steps, ResolveTrace, ResolveTraceStep, MAX_TRIED_PATHS};
