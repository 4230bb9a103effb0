//! Broken alias detection
//!
//! An alias is broken when its target is missing or is not a directory.
//! Symlinks are followed.

use std::fmt;
use std::fs;

use serde::Serialize;

use crate::domain::AliasEntry;

/// Why an alias target cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakage {
    Missing,
    NotDirectory,
}

impl fmt::Display for Breakage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breakage::Missing => write!(f, "Path does not exist"),
            Breakage::NotDirectory => write!(f, "Path is not a directory"),
        }
    }
}

/// Checks an entry's target on disk
pub fn check(entry: &AliasEntry) -> Option<Breakage> {
    match fs::metadata(entry.target()) {
        Err(_) => Some(Breakage::Missing),
        Ok(meta) if !meta.is_dir() => Some(Breakage::NotDirectory),
        Ok(_) => None,
    }
}

pub fn is_broken(entry: &AliasEntry) -> bool {
    check(entry).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn existing_directory_is_fine() {
        let dir = TempDir::new().unwrap();
        let entry = AliasEntry::new("ok", dir.path()).unwrap();

        assert_eq!(check(&entry), None);
        assert!(!is_broken(&entry));
    }

    #[test]
    fn missing_target() {
        let dir = TempDir::new().unwrap();
        let entry = AliasEntry::new("gone", dir.path().join("nope")).unwrap();

        assert_eq!(check(&entry), Some(Breakage::Missing));
    }

    #[test]
    fn file_target() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "x").unwrap();
        let entry = AliasEntry::new("file", &file).unwrap();

        assert_eq!(check(&entry), Some(Breakage::NotDirectory));
        assert_eq!(Breakage::NotDirectory.to_string(), "Path is not a directory");
    }
}
