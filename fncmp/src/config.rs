//! Configuration loading from fncmp.toml
//!
//! Comparison defaults can be set in a `fncmp.toml` file in the project root.
//! The configuration is discovered by walking up from the current directory.

use crate::runner::DEFAULT_NUM_RUNS;
use fncmp_report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Name of the configuration file looked up by [`FncmpConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "fncmp.toml";

/// fncmp configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FncmpConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for comparison runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// How many times each candidate is invoked
    #[serde(default = "default_num_runs")]
    pub num_runs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            num_runs: default_num_runs(),
        }
    }
}

fn default_num_runs() -> u64 {
    DEFAULT_NUM_RUNS
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Report format: "table", "html", "json", "csv".
    /// Unset means "pick from the output context".
    #[serde(default)]
    pub format: Option<String>,
}

impl OutputConfig {
    /// Parsed report format, if one is configured and recognised
    pub fn output_format(&self) -> Option<OutputFormat> {
        let format = self.format.as_deref()?;
        match format.parse() {
            Ok(format) => Some(format),
            Err(e) => {
                warn!("{e}; falling back to context-based formatter");
                None
            }
        }
    }
}

impl FncmpConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for `fncmp.toml`
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        warn!(path = %config_path.display(), "ignoring unreadable config: {e}");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# fncmp Configuration

[runner]
# How many times each candidate is invoked per comparison
num_runs = 5000

[output]
# Report format: table, html, json, csv
# When unset, a table is printed to terminals and HTML everywhere else
# format = "table"
"#
        .to_string()
    }
}
