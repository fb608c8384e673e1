use crate::error::ConfigError;
use crate::style::{StyleOverride, StyleTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_FETCH_LIMIT: usize = 500;

/// Display settings; every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_sidebar_width", alias = "sidebarWidth")]
    pub sidebar_width: String,
    #[serde(default = "default_time_icon", alias = "timeIcon")]
    pub time_icon: String,
    #[serde(default = "default_author_icon", alias = "authorIcon")]
    pub author_icon: String,
    #[serde(default = "default_type_icon", alias = "typeIcon")]
    pub type_icon: String,
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    #[serde(default)]
    pub type_styles: BTreeMap<String, StyleOverride>,
}

fn default_author() -> String {
    "恨水长秋".to_string()
}
fn default_location() -> String {
    "倒悬山".to_string()
}
fn default_sidebar_width() -> String {
    "480px".to_string()
}
fn default_time_icon() -> String {
    "📅".to_string()
}
fn default_author_icon() -> String {
    "🎨".to_string()
}
fn default_type_icon() -> String {
    "📌".to_string()
}
fn default_fetch_limit() -> usize {
    DEFAULT_FETCH_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author: default_author(),
            location: default_location(),
            sidebar_width: default_sidebar_width(),
            time_icon: default_time_icon(),
            author_icon: default_author_icon(),
            type_icon: default_type_icon(),
            fetch_limit: default_fetch_limit(),
            type_styles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Read a JSON config; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn style_table(&self) -> StyleTable {
        StyleTable::with_overrides(self.type_styles.clone())
    }
}
