//! Declarative validation schemas for content front matter
//!
//! A schema is data, not code: an ordered mapping of required field names
//! to type constraints, walked by one validator for every collection.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Raw front-matter fields as parsed from a document, in file order
pub type RawFields = IndexMap<String, serde_yaml::Value>;

/// Type constraint a required field must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Non-empty text
    Text,
    /// A calendar date
    Date,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Date => write!(f, "date"),
        }
    }
}

/// A normalized value produced by validating one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

/// Validation failure attributed to a single field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` expected {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        got: String,
    },
}

impl ValidationError {
    /// The field this error is attributed to
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field } => field,
            ValidationError::TypeMismatch { field, .. } => field,
        }
    }
}

/// Required-field contract for a collection's documents
///
/// Schemas are built once at configuration time and shared by reference
/// between collections; [`Schema::document`] is the site-wide shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldType>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field, builder style
    pub fn require(mut self, field: &str, ty: FieldType) -> Self {
        self.fields.insert(field.to_string(), ty);
        self
    }

    /// The shared document shape: `title: text`, `date: date`
    ///
    /// Every collection on the site uses this one schema value.
    pub fn document() -> Self {
        Self::new()
            .require("title", FieldType::Text)
            .require("date", FieldType::Date)
    }

    /// Iterate required fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Validate raw front matter against this schema
    ///
    /// Pure per-document: no state is shared between calls, so documents
    /// may be validated in any order. On success the returned fields carry
    /// parsed values (`date` as a real [`NaiveDate`], not a string).
    pub fn validate(&self, raw: &RawFields) -> Result<ValidatedFields, ValidationError> {
        let mut values = IndexMap::new();

        for (field, ty) in self.fields() {
            let value = match raw.get(field) {
                None | Some(serde_yaml::Value::Null) => {
                    return Err(ValidationError::MissingField {
                        field: field.to_string(),
                    });
                }
                Some(value) => value,
            };

            let normalized = check_field(field, ty, value)?;
            values.insert(field.to_string(), normalized);
        }

        Ok(ValidatedFields { values })
    }
}

/// Check one raw value against its declared type
fn check_field(
    field: &str,
    ty: FieldType,
    value: &serde_yaml::Value,
) -> Result<FieldValue, ValidationError> {
    let mismatch = |got: String| ValidationError::TypeMismatch {
        field: field.to_string(),
        expected: ty,
        got,
    };

    match ty {
        FieldType::Text => match value {
            serde_yaml::Value::String(s) if !s.trim().is_empty() => {
                Ok(FieldValue::Text(s.clone()))
            }
            serde_yaml::Value::String(_) => Err(mismatch("empty text".to_string())),
            other => Err(mismatch(yaml_type_name(other).to_string())),
        },
        FieldType::Date => match value {
            serde_yaml::Value::String(s) => parse_date(s)
                .map(FieldValue::Date)
                .ok_or_else(|| mismatch(format!("unparseable date `{}`", s))),
            other => Err(mismatch(yaml_type_name(other).to_string())),
        },
    }
}

/// Normalized fields of a document that passed validation, in schema order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedFields {
    values: IndexMap<String, FieldValue>,
}

impl ValidatedFields {
    /// Get a normalized field value by name
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Get a text field, if present and of text type
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get a date field, if present and of date type
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        match self.values.get(field) {
            Some(FieldValue::Date(d)) => Some(*d),
            _ => None,
        }
    }
}

/// Parse a date string in the formats front matter actually uses
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // Try RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

/// Describe a YAML value's type for error messages
fn yaml_type_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "text",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}
