//! Package manifest (`package.json`) entry-point discovery.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;
use stylepath_util::fs;
use tracing::debug;

/// Manifest file name, looked up directly inside a package directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Entry-point fields, in priority order. Style-specific fields come first,
/// `main` is the catch-all.
pub const ENTRY_FIELDS: &[&str] = &["sass", "scss", "style", "css", "main"];

/// Read the declared style entry point of the package in `package_dir`.
///
/// Returns `Ok(None)` when there is no manifest or none of [`ENTRY_FIELDS`]
/// holds a non-empty string. A manifest that exists but cannot be read or
/// parsed is an error.
pub fn entry_point(package_dir: &Path) -> Result<Option<String>> {
    let path = package_dir.join(MANIFEST_FILE);
    if !fs::exists(&[&path]) {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|source| Error::ManifestRead {
        path: path.clone(),
        source,
    })?;
    let manifest: Value = serde_json::from_str(&content).map_err(|source| Error::ManifestParse {
        path: path.clone(),
        source,
    })?;
    let Value::Object(fields) = manifest else {
        return Err(Error::ManifestNotObject { path });
    };

    let entry = ENTRY_FIELDS.iter().find_map(|field| {
        fields
            .get(*field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(|s| (*field, s))
    });

    match entry {
        Some((field, value)) => {
            debug!(manifest = %path.display(), field, value, "found manifest entry point");
            Ok(Some(value.to_string()))
        }
        None => {
            debug!(manifest = %path.display(), "manifest declares no entry point");
            Ok(None)
        }
    }
}
