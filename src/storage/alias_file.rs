//! Alias definition file
//!
//! Plain text, one definition per line:
//!
//! ```text
//! # full-line comment
//! work = ~/src/work          # inline comment
//! home = /home/me
//! ```
//!
//! The first `=` separates the alias from its target and a `#` after it ends
//! the target. Comments are not preserved: saving rewrites the file from the
//! in-memory entries only.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use thiserror::Error;

use crate::domain::{AliasEntry, PathContext};

/// A malformed line in the alias file
#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Failed to parse alias file \"{}\", line {line_number}:\n>> {raw_line}\n{message}",
    .path.display()
)]
pub struct ParseError {
    pub path: PathBuf,
    /// 1-based physical line number
    pub line_number: usize,
    pub raw_line: String,
    pub message: String,
}

const MISSING_SEPARATOR: &str =
    "Badly formed alias definition.\nMust be in the form of: \"alias = /path/to/directory\".";

/// Reads and writes the alias definition file
#[derive(Debug, Clone)]
pub struct AliasFile {
    path: PathBuf,
}

impl AliasFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the alias file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all entries in file order; a missing file has no entries
    pub fn load(&self, paths: &PathContext) -> Result<Vec<AliasEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to open alias file: {}", self.path.display()))?;

        FileExt::lock_shared(&file).context("Failed to acquire read lock on alias file")?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read alias file: {}", self.path.display()))?;

        Ok(self.parse(&content, paths)?)
    }

    /// Parses alias file content; targets are resolved against `paths`
    pub fn parse(&self, content: &str, paths: &PathContext) -> Result<Vec<AliasEntry>, ParseError> {
        let mut entries = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((alias_part, rest)) = line.split_once('=') else {
                return Err(self.parse_error(idx + 1, line, MISSING_SEPARATOR));
            };

            let alias = alias_part.trim();
            if alias.is_empty() {
                return Err(self.parse_error(idx + 1, line, "Alias name is missing."));
            }

            let raw_target = match rest.split_once('#') {
                Some((before, _)) => before.trim(),
                None => rest.trim(),
            };
            let raw_target = if raw_target.is_empty() { "~" } else { raw_target };

            let entry = AliasEntry::new(alias, paths.resolve(raw_target))
                .map_err(|e| self.parse_error(idx + 1, line, &e.to_string()))?;
            entries.push(entry);
        }

        Ok(entries)
    }

    fn parse_error(&self, line_number: usize, raw_line: &str, message: &str) -> ParseError {
        ParseError {
            path: self.path.clone(),
            line_number,
            raw_line: raw_line.to_string(),
            message: message.to_string(),
        }
    }

    /// Writes all entries in order, replacing the file atomically
    pub fn save(&self, entries: &[AliasEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            FileExt::lock_exclusive(&file).context("Failed to acquire write lock on alias file")?;

            let mut writer = BufWriter::new(&file);
            for entry in entries {
                writeln!(writer, "{}", entry.to_line()).context("Failed to write alias")?;
            }
            writer.flush().context("Failed to flush alias file")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "jdalias.defs".to_string());
        self.path.with_file_name(format!("{}.tmp", name))
    }
}
