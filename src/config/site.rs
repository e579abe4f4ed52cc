//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    /// Path prefix the site is served under
    pub root: String,

    // Directory
    pub data_dir: String,

    // Content
    /// Stop at the first invalid document instead of collecting failures
    pub strict: bool,
    /// chrono format string for displayed dates
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Vanessa Noizet".to_string(),
            author: "Vanessa Noizet".to_string(),
            language: "fr".to_string(),

            url: "https://example.com".to_string(),
            root: "/vanessa-noizet/".to_string(),

            data_dir: "data".to_string(),

            strict: true,
            date_format: "%Y-%m-%d".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
