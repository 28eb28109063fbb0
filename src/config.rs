//! Configuration file parsing (`fib.toml`).
//!
//! Every section and key is optional:
//!
//! ```toml
//! [sequence]
//! bound = 500
//!
//! [output]
//! format = "plain"
//! separator = " "
//! newline = true
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "fib.toml";

/// Bound used when neither the CLI nor a config file gives one.
pub const DEFAULT_BOUND: i64 = 500;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FibConfig {
    #[serde(default)]
    pub sequence: SequenceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SequenceConfig {
    #[serde(default = "default_bound")]
    pub bound: i64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default = "default_newline")]
    pub newline: bool,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            bound: default_bound(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            separator: default_separator(),
            newline: default_newline(),
        }
    }
}

fn default_bound() -> i64 {
    DEFAULT_BOUND
}

fn default_separator() -> String {
    " ".to_string()
}

fn default_newline() -> bool {
    true
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl FibConfig {
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid fib.toml")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("In {}", path.display()))
    }

    /// Resolves the configuration to use.
    ///
    /// An explicit path must exist. Otherwise `./fib.toml` is tried, then
    /// `~/.fib/config.toml`, then the built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::load(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(path) = global_config_path() {
            candidates.push(path);
        }

        Self::discover_in(&candidates)
    }

    /// Loads the first candidate that exists.
    pub fn discover_in(candidates: &[PathBuf]) -> Result<(Self, ConfigSource)> {
        for path in candidates {
            if path.is_file() {
                let config = Self::load(path)?;
                return Ok((config, ConfigSource::File(path.clone())));
            }
        }
        Ok((Self::default(), ConfigSource::Defaults))
    }

    fn validate(&self) -> Result<()> {
        if self.output.separator.is_empty() {
            bail!("output.separator must not be empty");
        }
        Ok(())
    }
}

/// `~/.fib/config.toml`, if a home directory exists.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".fib").join("config.toml"))
}
