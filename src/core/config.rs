//! Layered configuration
//!
//! Sources, lowest precedence first:
//! 1. `<user config dir>/prio/config.yaml`
//! 2. `.prio.yaml` in the working directory
//!
//! Command-line flags and `PRIO_FORMAT` override both (handled by clap).

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project-local configuration file name
pub const PROJECT_CONFIG_FILE: &str = ".prio.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default output format (table, tsv, csv, json, yaml, md)
    pub format: Option<String>,

    /// Scale file for `fuzzy-topsis` when `--scale` is not given
    pub fuzzy_topsis_scale: Option<PathBuf>,

    /// Scale file for `ifs-topsis` when `--scale` is not given
    pub ifs_topsis_scale: Option<PathBuf>,

    /// Tera template replacing the built-in Markdown report
    pub report_template: Option<PathBuf>,
}

impl Config {
    /// Load and merge every available source; never fails
    pub fn load() -> Self {
        let mut sources = Vec::new();
        if let Some(global) = Self::global_path() {
            sources.push(global);
        }
        sources.push(PathBuf::from(PROJECT_CONFIG_FILE));
        Self::load_from(&sources)
    }

    /// Merge the given files in order; missing or invalid files are skipped
    pub fn load_from(paths: &[PathBuf]) -> Self {
        let mut config = Self::default();
        for path in paths {
            if let Some(layer) = Self::read(path) {
                debug!(path = %path.display(), "loaded configuration layer");
                config.merge(layer);
            }
        }
        config
    }

    /// Path of the user-level configuration file
    pub fn global_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "prio").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn read(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config file");
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&content) {
            Ok(config) => Some(config.resolved_against(path.parent().unwrap_or(Path::new("")))),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                None
            }
        }
    }

    /// Make relative paths relative to the directory of the config file
    fn resolved_against(mut self, base: &Path) -> Self {
        let resolve = |p: Option<PathBuf>| {
            p.map(|p| if p.is_relative() { base.join(p) } else { p })
        };
        self.fuzzy_topsis_scale = resolve(self.fuzzy_topsis_scale);
        self.ifs_topsis_scale = resolve(self.ifs_topsis_scale);
        self.report_template = resolve(self.report_template);
        self
    }

    /// Overlay `other` on top of `self`, field by field
    pub fn merge(&mut self, other: Config) {
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.fuzzy_topsis_scale.is_some() {
            self.fuzzy_topsis_scale = other.fuzzy_topsis_scale;
        }
        if other.ifs_topsis_scale.is_some() {
            self.ifs_topsis_scale = other.ifs_topsis_scale;
        }
        if other.report_template.is_some() {
            self.report_template = other.report_template;
        }
    }
}
