//! Optional `learnpath-schema.toml` supplying defaults for the CLI flags.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use learnpath_codegen::DEFAULT_POSTGREST_VERSION;
use learnpath_core::DEFAULT_SCHEMA;

use crate::error::{CliError, CliResult};

pub const DEFAULT_CONFIG_PATH: &str = "learnpath-schema.toml";
pub const DEFAULT_OUT_DIR: &str = "crates/learnpath-types/src/generated";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Schemas introspected, rendered and checked when no `--schema` is given.
    pub schemas: Vec<String>,
    /// Directory of the `generated` module.
    pub out_dir: PathBuf,
    pub include_views: bool,
    pub postgrest_version: String,
    /// Rust type paths keyed by `schema.relation.column` or Postgres type name.
    pub type_overrides: BTreeMap<String, String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            schemas: vec![DEFAULT_SCHEMA.to_string()],
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            include_views: true,
            postgrest_version: DEFAULT_POSTGREST_VERSION.to_string(),
            type_overrides: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    /// Loads `path` if given (it must exist), else the default file when present.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|err| {
            CliError::InvalidConfig(format!("cannot read {}: {err}", path.display()))
        })?;
        let config: CliConfig = toml::from_str(&content)?;
        if config.schemas.is_empty() {
            return Err(CliError::InvalidConfig(format!(
                "{}: `schemas` must not be empty",
                path.display()
            )));
        }

        tracing::debug!(event = "config_loaded", path = %path.display());
        Ok(config)
    }

    /// Flag values win; the config list applies when none were passed.
    pub fn schemas_or(&self, flags: &[String]) -> Vec<String> {
        if flags.is_empty() {
            self.schemas.clone()
        } else {
            flags.to_vec()
        }
    }
}
