use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stylepath operations.
///
/// A specifier that simply does not resolve is never an error; it is reported
/// as `Ok(None)` by the resolver and the importer.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read manifest at {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest at {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest at {path} is not a JSON object")]
    ManifestNotObject { path: PathBuf },

    #[error("Cannot query file type of {path}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot express {path} as a file URL")]
    InvalidUrl { path: PathBuf },
}

/// Include path configuration errors. Always fatal, raised at setup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No include paths were given")]
    MissingIncludePaths,

    #[error("Include paths must be a path string or an array of path strings, got {found}")]
    InvalidIncludePaths { found: &'static str },

    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
