//! Scaffold a new document in a collection

use anyhow::Result;
use std::fs;

use crate::Site;

/// Create a markdown file with valid front matter in a collection's directory
pub fn run(site: &Site, collection_name: &str, title: &str) -> Result<()> {
    let collection = site
        .collections
        .get(collection_name)
        .ok_or_else(|| anyhow::anyhow!("unknown collection: {}", collection_name))?;

    let target_dir = site.data_dir.join(&collection.base);
    fs::create_dir_all(&target_dir)?;

    let filename = format!("{}.md", slug::slugify(title));
    let file_path = target_dir.join(&filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().date_naive();
    let content = format!(
        "---\ntitle: {}\ndate: {}\n---\n\n",
        title,
        today.format("%Y-%m-%d")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?} in `{}`", file_path, collection.name);
    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentLoader, LoadPolicy};
    use tempfile::TempDir;

    #[test]
    fn test_scaffolded_file_validates() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        run(&site, "hommages", "Hommage à Niki de Saint Phalle").unwrap();

        let loader = ContentLoader::with_policy(&site, LoadPolicy::FailFast);
        let collection = site.collections.get("hommages").unwrap();
        let report = loader.load_collection(collection).unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].title, "Hommage à Niki de Saint Phalle");
        assert_eq!(report.entries[0].id, "hommage-a-niki-de-saint-phalle");
    }

    #[test]
    fn test_existing_file_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        run(&site, "articles", "Même titre").unwrap();
        assert!(run(&site, "articles", "Même titre").is_err());
    }

    #[test]
    fn test_unknown_collection() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert!(run(&site, "brouillons", "Titre").is_err());
    }
}
