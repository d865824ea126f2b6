#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

//! Include-path resolution for stylesheet imports.
//!
//! Restores the legacy "include path" lookup for `@use`/`@import`
//! specifiers: each configured root directory is searched in order for a
//! directory index, a `package.json` style entry point, the exact file, an
//! inferred extension or partial, or a package-relative sub-path.

pub mod config;
pub mod error;
pub mod importer;
pub mod resolver;
pub mod version;

pub use config::{Config, IncludePaths};
pub use error::{ConfigError, Error, Result};
pub use importer::{file_url, Explanation, Importer, RootTrace, EXPLAIN_SCHEMA_VERSION};
pub use resolver::{find_file, package_root, resolve, resolve_with_trace, STYLE_EXTENSIONS};
pub use version::{VersionInfo, VERSION};
