//! Renderer configuration types
//!
//! The decoder itself takes no options: the CBF layout is fixed. What can be
//! configured is how a decoded file is written out as delimited text.

use serde::{Deserialize, Serialize};

/// Configuration for the delimited-text renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Column separator (default: `,`)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Whether to write the three heading lines before the table
    #[serde(default = "default_true")]
    pub include_headings: bool,

    /// Whether to write `Error: ...` lines before the table
    #[serde(default = "default_true")]
    pub include_errors: bool,
}

fn default_delimiter() -> char {
    ','
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            include_headings: true,
            include_errors: true,
        }
    }
}

impl RenderConfig {
    /// Create a new render configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the column separator
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder method: enable or disable heading lines
    pub fn with_headings(mut self, enabled: bool) -> Self {
        self.include_headings = enabled;
        self
    }

    /// Builder method: enable or disable error lines
    pub fn with_errors(mut self, enabled: bool) -> Self {
        self.include_errors = enabled;
        self
    }

    /// Write only the table
    pub fn table_only(self) -> Self {
        self.with_headings(false).with_errors(false)
    }
}
