//! recueil: typed content collections for a portfolio site
//!
//! This crate is the content layer of a personal portfolio: a registry of
//! named collections (articles, expositions, hommages, colloques,
//! ouvrages), a declarative front-matter validation contract shared by
//! all of them, a loader that enforces it, and the site's static
//! navigation and utility-style tables.

pub mod commands;
pub mod config;
pub mod content;
pub mod nav;
pub mod registry;
pub mod schema;
pub mod styles;

use anyhow::Result;
use std::path::Path;

use registry::CollectionRegistry;

/// The site: configuration, directories, and the collection registry
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content data directory
    pub data_dir: std::path::PathBuf,
    /// Registered content collections
    pub collections: CollectionRegistry,
}

impl Site {
    /// Create a site from a base directory
    ///
    /// Reads `_config.yml` when present, falls back to defaults otherwise.
    /// Collections are declared here, once, and never change afterwards.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let data_dir = base_dir.join(&config.data_dir);
        let collections = CollectionRegistry::site_default();

        Ok(Self {
            config,
            base_dir,
            data_dir,
            collections,
        })
    }

    /// Validate every collection and the navigation tree
    pub fn check(&self) -> Result<()> {
        commands::check::run(self, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_site_defaults_without_config() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        assert_eq!(site.data_dir, tmp.path().join("data"));
        assert_eq!(site.collections.len(), 5);
        assert!(site.config.strict);
    }

    #[test]
    fn test_site_reads_config_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("_config.yml"),
            "data_dir: contenu\nstrict: false\n",
        )
        .unwrap();

        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.data_dir, tmp.path().join("contenu"));
        assert!(!site.config.strict);
    }
}
