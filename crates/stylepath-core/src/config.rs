use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Config file name, discovered by walking up from the working directory.
pub const CONFIG_FILE: &str = "stylepath.json";

/// Runtime configuration for the stylepath CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Current working directory. Relative include paths are joined onto it.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Ordered include paths.
    pub include_paths: IncludePaths,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
            include_paths: IncludePaths::default(),
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Set include paths.
    #[must_use]
    pub fn with_include_paths(mut self, include_paths: IncludePaths) -> Self {
        self.include_paths = include_paths;
        self
    }
}

/// Ordered list of include paths (root directories searched in order).
///
/// Deserialises from a single path or an array of paths and always
/// serialises as an array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawIncludePaths")]
pub struct IncludePaths(Vec<PathBuf>);

/// Accepted input shapes for [`IncludePaths`].
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIncludePaths {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl From<RawIncludePaths> for IncludePaths {
    fn from(raw: RawIncludePaths) -> Self {
        match raw {
            RawIncludePaths::One(path) => Self(vec![path]),
            RawIncludePaths::Many(paths) => Self(paths),
        }
    }
}

impl IncludePaths {
    #[must_use]
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }

    /// Validate a loosely typed include path value.
    ///
    /// Accepts a single path string or an array of path strings (possibly
    /// empty). `null` means nothing was configured.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Null => Err(ConfigError::MissingIncludePaths),
            Value::String(path) => Ok(Self(vec![PathBuf::from(path)])),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(path) => Ok(PathBuf::from(path)),
                    other => Err(ConfigError::InvalidIncludePaths {
                        found: json_type_name(other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            other => Err(ConfigError::InvalidIncludePaths {
                found: json_type_name(other),
            }),
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<PathBuf> for IncludePaths {
    fn from(path: PathBuf) -> Self {
        Self(vec![path])
    }
}

impl From<Vec<PathBuf>> for IncludePaths {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array containing a non-string",
        Value::Object(_) => "an object",
    }
}

/// On-disk config file layout.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default, rename = "includePaths")]
    include_paths: Value,
}

/// Find the nearest config file by walking up from `cwd`.
#[must_use]
pub fn find_config_file(cwd: &Path) -> Option<PathBuf> {
    let mut current = cwd.to_path_buf();

    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load include paths from a config file.
///
/// Relative include paths in the file are taken relative to the file's
/// directory.
pub fn load_config_file(path: &Path) -> Result<IncludePaths, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let paths = IncludePaths::from_value(&file.include_paths)?;
    let base = path.parent().unwrap_or(Path::new(""));
    Ok(IncludePaths(paths.0.into_iter().map(|p| base.join(p)).collect()))
}

/// Pick include paths from the command line, an explicit config file, or a
/// discovered config file, in that order.
pub fn load_include_paths(
    cli_paths: Vec<PathBuf>,
    config_file: Option<&Path>,
    cwd: &Path,
) -> Result<IncludePaths, ConfigError> {
    if !cli_paths.is_empty() {
        return Ok(IncludePaths(cli_paths));
    }

    if let Some(path) = config_file {
        return load_config_file(&cwd.join(path));
    }

    match find_config_file(cwd) {
        Some(path) => load_config_file(&path),
        None => Err(ConfigError::MissingIncludePaths),
    }
}
