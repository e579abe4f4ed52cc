//! Content loader - discovers and validates collection documents

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{frontmatter, Entry, FrontMatterError};
use crate::registry::Collection;
use crate::schema::ValidationError;
use crate::Site;

use indexmap::IndexMap;

/// What to do when a document fails to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Stop at the first failing document
    FailFast,
    /// Load what validates, aggregate every failure in the report
    CollectErrors,
}

/// Cause of a single document's load failure
#[derive(Error, Debug)]
pub enum LoadErrorKind {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("id `{id}` already used by {other:?}")]
    DuplicateId { id: String, other: PathBuf },
}

/// A load failure attributed to its collection and source file
#[derive(Error, Debug)]
#[error("[{collection}] {path}: {kind}", path = .path.display())]
pub struct LoadFailure {
    /// Collection the document belongs to
    pub collection: String,
    /// Full path of the failing file
    pub path: PathBuf,
    /// What went wrong
    pub kind: LoadErrorKind,
}

/// Result of loading one collection
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Validated entries, newest first
    pub entries: Vec<Entry>,
    /// Attributed failures (empty under [`LoadPolicy::FailFast`])
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Map entries by their id
    pub fn by_id(&self) -> IndexMap<&str, &Entry> {
        self.entries.iter().map(|e| (e.id.as_str(), e)).collect()
    }
}

/// Loads documents from the site's data directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    policy: LoadPolicy,
}

impl<'a> ContentLoader<'a> {
    /// Create a loader with the policy from site configuration
    pub fn new(site: &'a Site) -> Self {
        let policy = if site.config.strict {
            LoadPolicy::FailFast
        } else {
            LoadPolicy::CollectErrors
        };
        Self { site, policy }
    }

    /// Override the failure policy
    pub fn with_policy(site: &'a Site, policy: LoadPolicy) -> Self {
        Self { site, policy }
    }

    /// Load every collection in registry order
    ///
    /// Under fail-fast the first failing document aborts the whole load;
    /// otherwise each collection's report carries its own failures.
    pub fn load_all(&self) -> Result<IndexMap<String, LoadReport>, LoadFailure> {
        let mut reports = IndexMap::new();
        for collection in self.site.collections.iter() {
            let report = self.load_collection(collection)?;
            reports.insert(collection.name.clone(), report);
        }
        Ok(reports)
    }

    /// Load one collection's documents
    pub fn load_collection(&self, collection: &Collection) -> Result<LoadReport, LoadFailure> {
        let base_dir = self.site.data_dir.join(&collection.base);
        let mut report = LoadReport::default();

        if !base_dir.exists() {
            tracing::debug!(
                "Collection `{}` has no source directory at {:?}",
                collection.name,
                base_dir
            );
            return Ok(report);
        }

        // id -> source path, for duplicate detection
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&base_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&base_dir).unwrap_or(path);
            if !collection.pattern.matches_path(relative) {
                continue;
            }

            match self.load_entry(collection, path, relative, &mut seen) {
                Ok(doc) => report.entries.push(doc),
                Err(kind) => {
                    let failure = LoadFailure {
                        collection: collection.name.clone(),
                        path: path.to_path_buf(),
                        kind,
                    };
                    tracing::warn!("{}", failure);
                    match self.policy {
                        LoadPolicy::FailFast => return Err(failure),
                        LoadPolicy::CollectErrors => report.failures.push(failure),
                    }
                }
            }
        }

        // Newest first; id keeps same-day entries stable
        report
            .entries
            .sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

        tracing::info!(
            "Loaded collection `{}`: {} entries, {} failures",
            collection.name,
            report.entries.len(),
            report.failures.len()
        );

        Ok(report)
    }

    /// Load and validate a single document
    fn load_entry(
        &self,
        collection: &Collection,
        path: &Path,
        relative: &Path,
        seen: &mut HashMap<String, PathBuf>,
    ) -> Result<Entry, LoadErrorKind> {
        let content = fs::read_to_string(path)?;
        let (raw, body) = frontmatter::parse(&content)?;

        let fields = collection.schema.validate(&raw)?;

        // A schema that does not declare these fails here, not at access
        let title = fields
            .text("title")
            .map(String::from)
            .ok_or_else(|| ValidationError::MissingField {
                field: "title".to_string(),
            })?;
        let date = fields
            .date("date")
            .ok_or_else(|| ValidationError::MissingField {
                field: "date".to_string(),
            })?;

        let id = Entry::id_from_source(relative);
        if let Some(other) = seen.insert(id.clone(), path.to_path_buf()) {
            return Err(LoadErrorKind::DuplicateId { id, other });
        }

        let extra = raw
            .iter()
            .filter(|(key, _)| fields.get(key).is_none())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Entry {
            id,
            collection: collection.name.clone(),
            source: relative.to_string_lossy().to_string(),
            full_source: path.to_path_buf(),
            title,
            date,
            body: body.to_string(),
            extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn write_doc(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn site_with_articles(tmp: &TempDir) -> Site {
        fs::create_dir_all(tmp.path().join("data/articles")).unwrap();
        Site::new(tmp.path()).unwrap()
    }

    fn articles_dir(site: &Site) -> PathBuf {
        site.data_dir.join("articles")
    }

    #[test]
    fn test_two_valid_one_missing_date() {
        let tmp = TempDir::new().unwrap();
        let site = site_with_articles(&tmp);
        let dir = articles_dir(&site);

        write_doc(&dir, "a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nun\n");
        write_doc(&dir, "b.md", "---\ntitle: B\ndate: 2024-02-01\n---\ndeux\n");
        write_doc(&dir, "c.md", "---\ntitle: C\n---\ntrois\n");

        let loader = ContentLoader::with_policy(&site, LoadPolicy::CollectErrors);
        let collection = site.collections.get("articles").unwrap();
        let report = loader.load_collection(collection).unwrap();

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.failures.len(), 1);

        let failure = &report.failures[0];
        assert_eq!(failure.collection, "articles");
        assert!(failure.path.ends_with("c.md"));
        assert!(matches!(
            &failure.kind,
            LoadErrorKind::Validation(ValidationError::MissingField { field }) if field == "date"
        ));
    }

    #[test]
    fn test_fail_fast_aborts() {
        let tmp = TempDir::new().unwrap();
        let site = site_with_articles(&tmp);
        let dir = articles_dir(&site);

        write_doc(&dir, "bad.md", "---\ntitle: Bad\ndate: jamais\n---\n");
        write_doc(&dir, "ok.md", "---\ntitle: Ok\ndate: 2024-01-01\n---\n");

        let loader = ContentLoader::with_policy(&site, LoadPolicy::FailFast);
        let collection = site.collections.get("articles").unwrap();
        let failure = loader.load_collection(collection).unwrap_err();

        assert_eq!(failure.collection, "articles");
        assert!(failure.path.ends_with("bad.md"));
    }

    #[test]
    fn test_entries_sorted_newest_first() {
        let tmp = TempDir::new().unwrap();
        let site = site_with_articles(&tmp);
        let dir = articles_dir(&site);

        write_doc(&dir, "old.md", "---\ntitle: Vieux\ndate: 2020-06-01\n---\n");
        write_doc(&dir, "new.md", "---\ntitle: Neuf\ndate: 2024-06-01\n---\n");
        write_doc(&dir, "mid.md", "---\ntitle: Entre\ndate: 2022-06-01\n---\n");

        let loader = ContentLoader::new(&site);
        let collection = site.collections.get("articles").unwrap();
        let report = loader.load_collection(collection).unwrap();

        let titles: Vec<&str> = report.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Neuf", "Entre", "Vieux"]);
    }

    #[test]
    fn test_nested_directories_and_pattern_filter() {
        let tmp = TempDir::new().unwrap();
        let site = site_with_articles(&tmp);
        let dir = articles_dir(&site);

        write_doc(
            &dir,
            "2023/essai.md",
            "---\ntitle: Essai\ndate: 2023-03-01\n---\n",
        );
        write_doc(&dir, "notes.txt", "not markdown");

        let loader = ContentLoader::new(&site);
        let collection = site.collections.get("articles").unwrap();
        let report = loader.load_collection(collection).unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].id, "2023/essai");
        assert_eq!(report.entries[0].source, "2023/essai.md");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let site = site_with_articles(&tmp);

        let loader = ContentLoader::new(&site);
        let collection = site.collections.get("hommages").unwrap();
        let report = loader.load_collection(collection).unwrap();

        assert!(report.entries.is_empty());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_duplicate_id_detected() {
        let tmp = TempDir::new().unwrap();
        let site = site_with_articles(&tmp);
        let dir = articles_dir(&site);

        // Both slug to `meme-titre`
        write_doc(
            &dir,
            "même titre.md",
            "---\ntitle: Un\ndate: 2024-01-01\n---\n",
        );
        write_doc(
            &dir,
            "meme-titre.md",
            "---\ntitle: Deux\ndate: 2024-01-02\n---\n",
        );

        let loader = ContentLoader::with_policy(&site, LoadPolicy::CollectErrors);
        let collection = site.collections.get("articles").unwrap();
        let report = loader.load_collection(collection).unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].kind,
            LoadErrorKind::DuplicateId { .. }
        ));
    }

    #[test]
    fn test_extra_fields_carried_through() {
        let tmp = TempDir::new().unwrap();
        let site = site_with_articles(&tmp);
        let dir = articles_dir(&site);

        write_doc(
            &dir,
            "expo.md",
            "---\ntitle: Exposition\ndate: 2024-05-10\nlieu: Paris\n---\nCorps.\n",
        );

        let loader = ContentLoader::new(&site);
        let collection = site.collections.get("articles").unwrap();
        let report = loader.load_collection(collection).unwrap();

        let entry = &report.entries[0];
        assert_eq!(entry.extra.get("lieu").and_then(|v| v.as_str()), Some("Paris"));
        assert!(!entry.extra.contains_key("title"));
        assert_eq!(entry.body, "Corps.\n");
    }

    #[test]
    fn test_load_all_covers_registry() {
        let tmp = TempDir::new().unwrap();
        let site = site_with_articles(&tmp);
        fs::create_dir_all(site.data_dir.join("hommages")).unwrap();
        write_doc(
            &site.data_dir.join("hommages"),
            "rodin.md",
            "---\ntitle: Rodin\ndate: 2023-11-11\n---\n",
        );

        let loader = ContentLoader::new(&site);
        let reports = loader.load_all().unwrap();

        assert_eq!(reports.len(), site.collections.len());
        assert_eq!(reports["hommages"].entries.len(), 1);
        assert_eq!(reports["hommages"].by_id()["rodin"].title, "Rodin");
    }

    #[test]
    fn test_custom_schema_collection() {
        let tmp = TempDir::new().unwrap();
        let mut site = site_with_articles(&tmp);

        let schema = Arc::new(
            Schema::new()
                .require("title", crate::schema::FieldType::Text)
                .require("date", crate::schema::FieldType::Date)
                .require("lieu", crate::schema::FieldType::Text),
        );
        site.collections
            .register(
                crate::registry::Collection::markdown("agenda", "/agenda", schema).unwrap(),
            )
            .unwrap();

        let dir = site.data_dir.join("agenda");
        write_doc(
            &dir,
            "vernissage.md",
            "---\ntitle: Vernissage\ndate: 2024-09-01\n---\n",
        );

        let loader = ContentLoader::with_policy(&site, LoadPolicy::CollectErrors);
        let collection = site.collections.get("agenda").unwrap();
        let report = loader.load_collection(collection).unwrap();

        assert!(report.entries.is_empty());
        assert!(matches!(
            &report.failures[0].kind,
            LoadErrorKind::Validation(ValidationError::MissingField { field }) if field == "lieu"
        ));
    }
}
