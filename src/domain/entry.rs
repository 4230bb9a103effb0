//! Alias entries
//!
//! An entry binds a short alias name to an absolute target path. Names must
//! survive a trip through the alias file, so anything the file format would
//! mangle (separators, comment markers, line breaks) is rejected up front.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("Alias name must not be empty")]
    EmptyAlias,

    #[error("Alias name '{0}' must not contain '=' or line breaks")]
    ReservedCharacter(String),

    #[error("Alias name '{0}' must not start with '#'")]
    CommentMarker(String),

    #[error("Alias name '{0}' must not start or end with whitespace")]
    SurroundingWhitespace(String),

    #[error("Target '{0}' cannot be stored: paths must not contain '#', line breaks, or surrounding whitespace")]
    UnstorableTarget(String),
}

/// A single alias definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    pub alias: String,
    pub target: PathBuf,
}

impl AliasEntry {
    /// Creates an entry after checking that both halves can be written to the alias file
    pub fn new(alias: impl Into<String>, target: impl Into<PathBuf>) -> Result<Self, EntryError> {
        let alias = alias.into();
        let target = target.into();
        validate_alias(&alias)?;
        validate_target(&target)?;
        Ok(Self { alias, target })
    }

    /// Returns the target path
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Renders the entry as an alias file line (without trailing newline)
    pub fn to_line(&self) -> String {
        format!("{} = {}", self.alias, self.target.display())
    }
}

impl AsRef<str> for AliasEntry {
    fn as_ref(&self) -> &str {
        &self.alias
    }
}

/// Checks that an alias name can be stored and parsed back unchanged
pub fn validate_alias(alias: &str) -> Result<(), EntryError> {
    if alias.is_empty() {
        return Err(EntryError::EmptyAlias);
    }
    if alias.contains(['=', '\n', '\r']) {
        return Err(EntryError::ReservedCharacter(alias.to_string()));
    }
    if alias.starts_with('#') {
        return Err(EntryError::CommentMarker(alias.to_string()));
    }
    if alias.trim() != alias {
        return Err(EntryError::SurroundingWhitespace(alias.to_string()));
    }
    Ok(())
}

fn validate_target(target: &Path) -> Result<(), EntryError> {
    let raw = target.to_string_lossy();
    if raw.contains(['#', '\n', '\r']) || raw.trim() != raw {
        return Err(EntryError::UnstorableTarget(raw.into_owned()));
    }
    Ok(())
}
