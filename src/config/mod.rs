//! Job configuration
//!
//! Settings come from, in increasing precedence: built-in defaults, a TOML
//! file, `RELGRAPH_*` environment variables, command-line flags.
//!
//! ```toml
//! [degree]
//! reducers = 4
//! summary = "merged"
//! json = true
//!
//! [category]
//! column = 3
//! header_marker = "video_id"
//! ```

use crate::category::CategoryOptions;
use crate::degree::{DegreeOptions, SummaryMode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "relgraph.toml";

pub const ENV_REDUCERS: &str = "RELGRAPH_REDUCERS";
pub const ENV_SUMMARY: &str = "RELGRAPH_SUMMARY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub degree: DegreeConfig,
    pub category: CategoryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DegreeConfig {
    pub reducers: Option<usize>,
    pub summary: Option<SummaryMode>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryConfig {
    pub reducers: Option<usize>,
    pub column: Option<usize>,
    pub header_marker: Option<String>,
}

/// Command-line values that override the configuration when present.
#[derive(Debug, Clone, Default)]
pub struct DegreeOverrides {
    pub reducers: Option<usize>,
    pub summary: Option<SummaryMode>,
    pub json: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryOverrides {
    pub reducers: Option<usize>,
    pub column: Option<usize>,
    pub header_marker: Option<String>,
}

impl Config {
    /// Load `path`, or `relgraph.toml` in the working directory when no path
    /// is given and that file exists. Environment overrides are applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.merge_env_vars()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to read variables.
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_REDUCERS) {
            let reducers = raw.trim().parse::<usize>().map_err(|_| {
                Error::Config(format!("{ENV_REDUCERS} must be a positive integer, got '{raw}'"))
            })?;
            self.degree.reducers = Some(reducers);
            self.category.reducers = Some(reducers);
        }

        if let Some(raw) = lookup(ENV_SUMMARY) {
            let summary = match raw.trim() {
                "merged" => SummaryMode::Merged,
                "per-partition" => SummaryMode::PerPartition,
                other => {
                    return Err(Error::Config(format!(
                        "{ENV_SUMMARY} must be 'merged' or 'per-partition', got '{other}'"
                    )))
                }
            };
            self.degree.summary = Some(summary);
        }
        Ok(())
    }

    /// Resolved degree job settings plus whether to write `summary.json`.
    pub fn degree_options(&self, overrides: &DegreeOverrides) -> Result<(DegreeOptions, bool)> {
        let defaults = DegreeOptions::default();
        let options = DegreeOptions {
            reducers: overrides
                .reducers
                .or(self.degree.reducers)
                .unwrap_or(defaults.reducers),
            summary: overrides
                .summary
                .or(self.degree.summary)
                .unwrap_or(defaults.summary),
        };
        validate_reducers(options.reducers)?;
        let json = overrides.json || self.degree.json.unwrap_or(false);
        Ok((options, json))
    }

    pub fn category_options(&self, overrides: &CategoryOverrides) -> Result<CategoryOptions> {
        let defaults = CategoryOptions::default();
        let options = CategoryOptions {
            reducers: overrides
                .reducers
                .or(self.category.reducers)
                .unwrap_or(defaults.reducers),
            column: overrides
                .column
                .or(self.category.column)
                .unwrap_or(defaults.column),
            header_marker: overrides
                .header_marker
                .clone()
                .or_else(|| self.category.header_marker.clone())
                .unwrap_or(defaults.header_marker),
        };
        validate_reducers(options.reducers)?;
        Ok(options)
    }
}

fn validate_reducers(reducers: usize) -> Result<()> {
    if reducers == 0 {
        return Err(Error::Config("reducers must be at least 1".to_string()));
    }
    Ok(())
}
