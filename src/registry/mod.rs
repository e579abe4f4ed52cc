//! Collection registry - the named content categories of the site

use glob::Pattern;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use indexmap::IndexMap;

use crate::schema::Schema;

/// Registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("collection `{name}` is already registered")]
    DuplicateCollection { name: String },

    #[error("invalid source pattern `{pattern}` for collection `{name}`")]
    InvalidPattern {
        name: String,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// A named category of content documents
///
/// Collections are declared once at configuration time and never mutated.
/// The schema is an `Arc`: every collection points at the same shared
/// contract value.
#[derive(Debug, Clone)]
pub struct Collection {
    /// Unique key, also the name of the source directory under the data dir
    pub name: String,
    /// Site path the collection is served under (not always `/<name>`)
    pub route: String,
    /// Source directory relative to the data dir
    pub base: PathBuf,
    /// File pattern matched against paths relative to `base`
    pub pattern: Pattern,
    /// Required-field contract for member documents
    pub schema: Arc<Schema>,
}

impl Collection {
    /// Declare a collection with an explicit source directory and pattern
    pub fn new(
        name: &str,
        route: &str,
        base: impl AsRef<Path>,
        pattern: &str,
        schema: Arc<Schema>,
    ) -> Result<Self, RegistryError> {
        let pattern = Pattern::new(pattern).map_err(|e| RegistryError::InvalidPattern {
            name: name.to_string(),
            pattern: pattern.to_string(),
            source: e,
        })?;

        Ok(Self {
            name: name.to_string(),
            route: route.to_string(),
            base: base.as_ref().to_path_buf(),
            pattern,
            schema,
        })
    }

    /// Declare a markdown collection rooted at `<name>/` with the shared pattern
    pub fn markdown(name: &str, route: &str, schema: Arc<Schema>) -> Result<Self, RegistryError> {
        Self::new(name, route, name, "**/*.md", schema)
    }
}

/// Ordered, immutable-after-setup registry of collections
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    collections: IndexMap<String, Collection>,
}

impl CollectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection; names must be unique
    pub fn register(&mut self, collection: Collection) -> Result<(), RegistryError> {
        if self.collections.contains_key(&collection.name) {
            return Err(RegistryError::DuplicateCollection {
                name: collection.name.clone(),
            });
        }
        tracing::debug!("Registered collection `{}`", collection.name);
        self.collections.insert(collection.name.clone(), collection);
        Ok(())
    }

    /// Look a collection up by name
    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// Iterate collections in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }

    /// Number of registered collections
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Whether any collection is served under the given route
    pub fn contains_route(&self, route: &str) -> bool {
        self.collections.values().any(|c| c.route == route)
    }

    /// The portfolio's collections, all sharing one document schema
    pub fn site_default() -> Self {
        let schema = Arc::new(Schema::document());
        let mut registry = Self::new();

        let declarations = [
            ("articles", "/ecrits/articles"),
            ("expositions", "/expositions"),
            ("hommages", "/hommages"),
            ("colloques", "/recherche/colloques"),
            ("ouvrages", "/ecrits/ouvrages"),
        ];

        for (name, route) in declarations {
            let collection = Collection::markdown(name, route, Arc::clone(&schema))
                .expect("static collection pattern is valid");
            registry
                .register(collection)
                .expect("static collection names are unique");
        }

        registry
    }
}
