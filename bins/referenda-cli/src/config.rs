//! CLI defaults loaded from environment variables.

use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// How results are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("unknown output format {other:?} (expected text or json)"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Output format when `--json` is not given.
    pub output: OutputFormat,
    /// Number of intervals `table` samples when `--points` is not given.
    pub table_points: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            table_points: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let output = match lookup("REFERENDA_OUTPUT") {
            Some(raw) => raw.parse().context("REFERENDA_OUTPUT")?,
            None => defaults.output,
        };

        let table_points = match lookup("REFERENDA_TABLE_POINTS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("REFERENDA_TABLE_POINTS must be a non-negative integer")?,
            None => defaults.table_points,
        };

        Ok(Config {
            output,
            table_points,
        })
    }
}
