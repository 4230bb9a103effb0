//! Target path resolution
//!
//! Targets are stored absolute and tilde-expanded. Resolution is purely
//! lexical: the path does not have to exist and symlinks are not followed.

use std::path::{Component, Path, PathBuf};

/// The home and working directories that relative targets are resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    home: PathBuf,
    cwd: PathBuf,
}

impl PathContext {
    pub fn new(home: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            cwd: cwd.into(),
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Expands a leading `~` or `~/` to the home directory
    ///
    /// `~user` forms are left untouched.
    pub fn expand_tilde(&self, raw: &str) -> PathBuf {
        if raw == "~" {
            return self.home.clone();
        }
        match raw.strip_prefix("~/") {
            Some(rest) => self.home.join(rest),
            None => PathBuf::from(raw),
        }
    }

    /// Tilde-expands `raw`, anchors it at the working directory, and normalizes it
    pub fn resolve(&self, raw: &str) -> PathBuf {
        let expanded = self.expand_tilde(raw);
        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            self.cwd.join(expanded)
        };
        normalize(&absolute)
    }
}

/// Removes `.` and `..` components and trailing separators without touching the filesystem
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if out.parent().is_some() {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
