//! Validated entry model

use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::schema::RawFields;

/// A content document that passed its collection's schema
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Identifier derived from the source path, unique within a collection
    pub id: String,

    /// Name of the collection the entry belongs to
    pub collection: String,

    /// Source file path relative to the collection's base directory
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Document title
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Raw markdown body, untouched
    pub body: String,

    /// Front-matter fields outside the schema, in file order
    pub extra: RawFields,
}

impl Entry {
    /// Derive an entry id from a path relative to the collection base
    ///
    /// Each path component is slugged, the extension dropped:
    /// `2023/Hommage à Rodin.md` becomes `2023/hommage-a-rodin`.
    pub fn id_from_source(source: &Path) -> String {
        let without_ext = source.with_extension("");
        without_ext
            .components()
            .map(|c| slug::slugify(c.as_os_str().to_string_lossy()))
            .collect::<Vec<_>>()
            .join("/")
    }
}
