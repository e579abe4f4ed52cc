//! Front-matter extraction
//!
//! Splits a markdown document into its raw YAML front-matter fields and
//! body. No validation happens here; the raw fields are handed to the
//! collection's schema.

use thiserror::Error;

use crate::schema::RawFields;

/// Front-matter extraction errors
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front-matter block is not terminated by `---`")]
    Unterminated,

    #[error("invalid front-matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a document into raw front-matter fields and remaining body
///
/// A document without a leading `---` fence has no front matter: the
/// fields are empty and the body is the whole content. An opening fence
/// without a closing one is an error.
pub fn parse(content: &str) -> Result<(RawFields, &str), FrontMatterError> {
    let trimmed = content.trim_start();

    let Some(rest) = trimmed.strip_prefix("---") else {
        return Ok((RawFields::new(), content));
    };
    let rest = rest.trim_start_matches(['\n', '\r']);

    let Some(end_pos) = rest.find("\n---") else {
        return Err(FrontMatterError::Unterminated);
    };

    let yaml_content = &rest[..end_pos];
    let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

    if yaml_content.trim().is_empty() {
        return Ok((RawFields::new(), remaining));
    }

    let fields: RawFields = serde_yaml::from_str(yaml_content)?;
    Ok((fields, remaining))
}
