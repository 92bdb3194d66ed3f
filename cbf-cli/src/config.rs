//! Configuration loading and parsing

use anyhow::{Context, Result};
use cbf_decoder::RenderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub decode: DecodeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub include_headings: bool,
    #[serde(default = "default_true")]
    pub include_errors: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            delimiter: default_delimiter(),
            output_dir: None,
            include_headings: true,
            include_errors: true,
        }
    }
}

impl OutputConfig {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new()
            .with_delimiter(self.delimiter)
            .with_headings(self.include_headings)
            .with_errors(self.include_errors)
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DecodeConfig {
    /// Treat any parse error as a failure
    #[serde(default)]
    pub strict: bool,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
