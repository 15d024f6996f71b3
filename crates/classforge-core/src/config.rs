//! Run configuration.
//!
//! Configuration is layered: defaults, then a JSON file (or string), then
//! environment overrides:
//!
//! | variable | field |
//! |----------|-------|
//! | `CLASSFORGE_MAPPINGS` | [`TransformConfig::mappings`] |
//! | `CLASSFORGE_REMAP` | [`TransformConfig::remap`] |
//! | `CLASSFORGE_APPLY_ACCESS` | [`TransformConfig::apply_access`] |
//! | `CLASSFORGE_FLATTEN_HIERARCHY` | [`TransformConfig::flatten_hierarchy`] |
//! | `CLASSFORGE_PARALLEL` | [`TransformConfig::parallel`] |
//!
//! Boolean variables accept `1/true/yes/on` and `0/false/no/off`; anything
//! else leaves the field unchanged.

use std::path::{Path, PathBuf};

use classforge_types::env_utils::{env_flag, env_path};
use classforge_types::MappingTable;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};

pub const ENV_MAPPINGS: &str = "CLASSFORGE_MAPPINGS";
pub const ENV_REMAP: &str = "CLASSFORGE_REMAP";
pub const ENV_APPLY_ACCESS: &str = "CLASSFORGE_APPLY_ACCESS";
pub const ENV_FLATTEN_HIERARCHY: &str = "CLASSFORGE_FLATTEN_HIERARCHY";
pub const ENV_PARALLEL: &str = "CLASSFORGE_PARALLEL";

fn default_true() -> bool {
    true
}

/// What a [`TransformRun`](crate::TransformRun) does to each class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// JSON symbol table to load (default: none).
    ///
    /// Without a table classes keep their names even when `remap` is set.
    #[serde(default)]
    pub mappings: Option<PathBuf>,

    /// Rename classes through the symbol table (default: true).
    #[serde(default = "default_true")]
    pub remap: bool,

    /// Apply registered access overrides (default: true).
    #[serde(default = "default_true")]
    pub apply_access: bool,

    /// Collect and flatten the class hierarchy before transforming, so
    /// references to inherited members are renamed too (default: false).
    #[serde(default)]
    pub flatten_hierarchy: bool,

    /// Transform batches on the rayon thread pool (default: false).
    #[serde(default)]
    pub parallel: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            mappings: None,
            remap: true,
            apply_access: true,
            flatten_hierarchy: false,
            parallel: false,
        }
    }
}

impl TransformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TransformError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| TransformError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json)
            .map_err(|e| TransformError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply `CLASSFORGE_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(path) = env_path(ENV_MAPPINGS) {
            self.mappings = Some(path);
        }
        if let Some(remap) = env_flag(ENV_REMAP) {
            self.remap = remap;
        }
        if let Some(apply_access) = env_flag(ENV_APPLY_ACCESS) {
            self.apply_access = apply_access;
        }
        if let Some(flatten) = env_flag(ENV_FLATTEN_HIERARCHY) {
            self.flatten_hierarchy = flatten;
        }
        if let Some(parallel) = env_flag(ENV_PARALLEL) {
            self.parallel = parallel;
        }
        self
    }

    pub fn with_mappings(mut self, path: impl Into<PathBuf>) -> Self {
        self.mappings = Some(path.into());
        self
    }

    pub fn with_remap(mut self, enabled: bool) -> Self {
        self.remap = enabled;
        self
    }

    pub fn with_access(mut self, enabled: bool) -> Self {
        self.apply_access = enabled;
        self
    }

    pub fn with_flatten_hierarchy(mut self, enabled: bool) -> Self {
        self.flatten_hierarchy = enabled;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Load the configured symbol table, if any.
    pub fn load_mappings(&self) -> Result<Option<MappingTable>> {
        let Some(path) = self.mappings.as_deref() else {
            return Ok(None);
        };
        MappingTable::from_json_file(path)
            .map(Some)
            .map_err(|e| TransformError::Config(format!("{:#}", e)))
    }
}
