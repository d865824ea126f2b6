use crate::config::CONFIG_FILE;
use crate::importer::EXPLAIN_SCHEMA_VERSION;
use crate::resolver::{ENTRY_FIELDS, STYLE_EXTENSIONS};
use serde::Serialize;
use std::fmt::{self, Write};

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What this build resolves and how, as reported by `stylepath version`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_hash: Option<&'static str>,
    pub extensions: &'static [&'static str],
    pub entry_fields: &'static [&'static str],
    pub config_file: &'static str,
    pub explain_schema_version: u32,
}

impl VersionInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            version: VERSION,
            git_hash: option_env!("STYLEPATH_BUILD_GIT_HASH"),
            extensions: STYLE_EXTENSIONS,
            entry_fields: ENTRY_FIELDS,
            config_file: CONFIG_FILE,
            explain_schema_version: EXPLAIN_SCHEMA_VERSION,
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = format!("stylepath {}", self.version);
        if let Some(hash) = self.git_hash {
            let _ = write!(s, " ({hash})");
        }
        writeln!(f, "{s}")?;
        writeln!(f, "extensions: {}", self.extensions.join(", "))?;
        writeln!(f, "entry fields: {}", self.entry_fields.join(", "))?;
        write!(f, "explain schema: v{}", self.explain_schema_version)
    }
}

/// Human-readable version report, one fact per line.
#[must_use]
pub fn version_string() -> String {
    VersionInfo::current().to_string()
}
