//! Demo configuration, loaded from TOML.

use std::{fs, path::Path};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use tagview::TagsConfig;

/// Settings for the onboarding screen itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoSettings {
    /// Number of pages.
    pub pages: u32,
    /// Columns scrolled per arrow key press.
    pub step: u32,
    /// Layout units per terminal column.
    pub column_width: u32,
    /// Layout units per terminal row.
    pub row_height: u32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            pages: 4,
            step: 4,
            column_width: 8,
            row_height: 10,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tags view configuration for the quote.
    pub tags: TagsConfig,
    /// Screen settings.
    pub demo: DemoSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: TagsConfig::default()
                .with_space((4, 0))
                .with_spacing(8, 0),
            demo: DemoSettings::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.tags.validate()?;
        if config.demo.pages == 0 {
            anyhow::bail!("demo.pages must be at least 1");
        }
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
