//! §4.10's "file for the stable defaults" half of the CLI's layered
//! configuration surface. A plain TOML mirror of [`checker_core::CheckerConfig`]
//! that can't itself store a compiled `RegexSet`, so it carries the raw
//! pattern lists and only compiles them when [`ConfigFile::into_checker_config`]
//! is called.

use std::fs;
use std::path::Path;

use checker_core::{CheckerConfig, CheckerResult};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct ConfigFile {
    pub enable_analysis: bool,
    pub enable_health_oracle: bool,
    pub enable_wildcard_fallback: bool,
    pub exclude_path_regex: Vec<String>,
    pub exclude_error_regex: Vec<String>,
    pub generic_fields: Vec<String>,
    pub namespace: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let defaults = CheckerConfig::default();
        Self {
            enable_analysis: defaults.enable_analysis,
            enable_health_oracle: defaults.enable_health_oracle,
            enable_wildcard_fallback: defaults.enable_wildcard_fallback,
            exclude_path_regex: Vec::new(),
            exclude_error_regex: Vec::new(),
            generic_fields: Vec::new(),
            namespace: defaults.namespace,
        }
    }
}

impl ConfigFile {
    /// Loads a `ConfigFile` from `path`, or returns the built-in defaults
    /// when `path` is `None` (the CLI's config file is optional).
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigFileError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn into_checker_config(self) -> CheckerResult<CheckerConfig> {
        CheckerConfig::new(
            self.enable_analysis,
            self.enable_health_oracle,
            self.enable_wildcard_fallback,
            &self.exclude_path_regex,
            &self.exclude_error_regex,
            &self.generic_fields,
            self.namespace,
        )
    }
}

#[derive(Debug)]
pub(crate) enum ConfigFileError {
    Read { path: std::path::PathBuf, source: std::io::Error },
    Parse { path: std::path::PathBuf, source: toml::de::Error },
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, .. } => write!(f, "failed to read config file `{}`", path.display()),
            Self::Parse { path, .. } => write!(f, "failed to parse config file `{}`", path.display()),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
