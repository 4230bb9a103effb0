//! In-memory alias store
//!
//! Entries are kept in file order, which defines the 1-based indices users
//! can type, next to a name -> position map for exact lookups. Every
//! mutation rewrites the whole alias file before returning; if the write
//! fails the in-memory state is rolled back so memory and disk agree.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use super::alias_file::AliasFile;
use super::config::Config;
use super::validator::{self, Breakage};
use crate::domain::{match_alias, AliasEntry, Match, PathContext};
use crate::SHELL_FUNCTION;

/// Yes/no question asked before overwriting or deleting an alias
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> Result<bool>,
{
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self(question)
    }
}

/// Result of [`AliasStore::add_alias`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(AliasEntry),
    /// An existing alias now points somewhere else
    Replaced {
        entry: AliasEntry,
        previous: PathBuf,
    },
    /// The user declined to overwrite
    Declined,
}

/// Result of [`AliasStore::remove_alias`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(AliasEntry),
    Declined,
    NotFound,
}

/// An entry that failed validation, with its 1-based index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenAlias {
    pub index: usize,
    pub entry: AliasEntry,
    pub breakage: Breakage,
}

/// Ordered collection of aliases backed by an alias file
#[derive(Debug)]
pub struct AliasStore {
    file: AliasFile,
    paths: PathContext,
    entries: Vec<AliasEntry>,
    positions: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl AliasStore {
    /// Creates an empty store; call [`load_aliases`](Self::load_aliases) to read the file
    pub fn new(file: AliasFile, paths: PathContext) -> Self {
        Self {
            file,
            paths,
            entries: Vec::new(),
            positions: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Opens and loads the store described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        let mut store = Self::new(AliasFile::new(&config.alias_file), config.paths.clone());
        store.load_aliases()?;
        Ok(store)
    }

    /// Replaces the in-memory state with the file contents
    ///
    /// A repeated alias keeps the position of its first definition and the
    /// target of its last one.
    pub fn load_aliases(&mut self) -> Result<()> {
        let loaded = self.file.load(&self.paths)?;

        self.entries.clear();
        self.positions.clear();
        self.duplicates.clear();

        for entry in loaded {
            match self.positions.get(&entry.alias) {
                Some(&pos) => {
                    self.duplicates.push(entry.alias.clone());
                    self.entries[pos].target = entry.target;
                }
                None => {
                    self.positions.insert(entry.alias.clone(), self.entries.len());
                    self.entries.push(entry);
                }
            }
        }

        Ok(())
    }

    /// Path of the backing alias file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aliases defined more than once in the file at last load
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Looks up an alias by exact name
    pub fn get(&self, alias: &str) -> Option<&AliasEntry> {
        self.positions.get(alias).map(|&pos| &self.entries[pos])
    }

    /// Resolves a token by exact name, 1-based index, or unique prefix
    pub fn match_alias(&self, token: &str) -> Match {
        match self.positions.get(token) {
            Some(&pos) => Match::Exact(pos),
            None => match_alias(&self.entries, token),
        }
    }

    /// Resolves a token to its entry
    pub fn lookup(&self, token: &str) -> Option<&AliasEntry> {
        self.match_alias(token).position().map(|pos| &self.entries[pos])
    }

    /// Resolved target for the shell wrapper, or an empty string
    pub fn evaluate(&self, token: &str) -> String {
        self.lookup(token)
            .map(|entry| entry.target.display().to_string())
            .unwrap_or_default()
    }

    pub fn check_alias(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }

    /// Binds `alias` to `directory`, appending new aliases to the end
    ///
    /// When the alias exists and `confirm` is given, the user is asked before
    /// the old target is replaced.
    pub fn add_alias(
        &mut self,
        alias: &str,
        directory: &str,
        confirm: Option<&mut dyn Confirm>,
    ) -> Result<AddOutcome> {
        let entry = AliasEntry::new(alias, self.paths.resolve(directory))?;

        let Some(&pos) = self.positions.get(alias) else {
            let previous = self.entries.clone();
            self.positions.insert(entry.alias.clone(), self.entries.len());
            self.entries.push(entry.clone());
            self.persist(previous)?;
            return Ok(AddOutcome::Added(entry));
        };

        let old_target = self.entries[pos].target.clone();
        if let Some(confirm) = confirm {
            let question = format!(
                "Alias \"{}\" (=> \"{}\") already exists.\nReplace with new definition (y/N)? ",
                alias,
                old_target.display()
            );
            if !confirm.confirm(&question)? {
                return Ok(AddOutcome::Declined);
            }
        }

        let previous = self.entries.clone();
        self.entries[pos].target = entry.target.clone();
        self.persist(previous)?;

        Ok(AddOutcome::Replaced {
            entry,
            previous: old_target,
        })
    }

    /// Removes the alias `token` resolves to
    pub fn remove_alias(
        &mut self,
        token: &str,
        confirm: Option<&mut dyn Confirm>,
    ) -> Result<RemoveOutcome> {
        let Some(pos) = self.match_alias(token).position() else {
            return Ok(RemoveOutcome::NotFound);
        };

        if let Some(confirm) = confirm {
            let entry = &self.entries[pos];
            let question = format!(
                "Alias \"{}\" (=> \"{}\") will be deleted. Proceed (y/N)? ",
                entry.alias,
                entry.target.display()
            );
            if !confirm.confirm(&question)? {
                return Ok(RemoveOutcome::Declined);
            }
        }

        let previous = self.entries.clone();
        let removed = self.entries.remove(pos);
        self.reindex();
        self.persist(previous)?;

        Ok(RemoveOutcome::Removed(removed))
    }

    /// Sorts aliases by name, saves, and reloads from disk
    pub fn sort_aliases(&mut self) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }

        let previous = self.entries.clone();
        self.entries.sort_by(|a, b| a.alias.cmp(&b.alias));
        self.reindex();
        self.persist(previous)?;
        self.load_aliases()
    }

    /// Entries whose target is missing or not a directory
    pub fn broken(&self) -> Vec<BrokenAlias> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(pos, entry)| {
                validator::check(entry).map(|breakage| BrokenAlias {
                    index: pos + 1,
                    entry: entry.clone(),
                    breakage,
                })
            })
            .collect()
    }

    /// Removes every broken alias without asking; returns what was removed
    pub fn clean_aliases(&mut self) -> Result<Vec<BrokenAlias>> {
        let broken = self.broken();
        if broken.is_empty() {
            return Ok(broken);
        }

        let previous = self.entries.clone();
        let mut position = 0;
        self.entries.retain(|_| {
            position += 1;
            !broken.iter().any(|b| b.index == position)
        });
        self.reindex();
        self.persist(previous)?;

        Ok(broken)
    }

    /// Human-readable listing, one item per output line
    pub fn list_aliases(&self, show_broken: bool) -> Listing<'_> {
        let width = self
            .entries
            .iter()
            .map(|e| e.alias.chars().count())
            .max()
            .unwrap_or(0)
            + 4;

        Listing {
            store: self,
            show_broken,
            width,
            next: 0,
            pending: None,
        }
    }

    /// All alias names separated by spaces, for shell completion
    pub fn choices(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.alias.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn reindex(&mut self) {
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, e)| (e.alias.clone(), pos))
            .collect();
    }

    fn persist(&mut self, previous: Vec<AliasEntry>) -> Result<()> {
        if let Err(e) = self.file.save(&self.entries) {
            self.entries = previous;
            self.reindex();
            return Err(e);
        }
        Ok(())
    }
}

/// Lazily rendered alias listing
///
/// Entries are checked on disk only as the iterator reaches them. A clone
/// taken before iterating replays the same lines.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    store: &'a AliasStore,
    show_broken: bool,
    width: usize,
    next: usize,
    pending: Option<String>,
}

impl Listing<'_> {
    fn empty_notice(&mut self) -> Option<String> {
        let line = match self.next {
            0 => format!("No aliases defined in \"{}\".", self.store.path().display()),
            1 => format!(
                "Use \"{} -a <alias> [</path/to/directory>]\" to define an alias.",
                SHELL_FUNCTION
            ),
            _ => return None,
        };
        self.next += 1;
        Some(line)
    }
}

impl Iterator for Listing<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(line) = self.pending.take() {
            return Some(line);
        }

        if self.store.is_empty() {
            return self.empty_notice();
        }

        while let Some(entry) = self.store.entries.get(self.next) {
            self.next += 1;
            let line = format!(
                "{:>3}: {:<width$} {}",
                self.next,
                format!("{} ", entry.alias),
                entry.target.display(),
                width = self.width
            );

            if !self.show_broken {
                return Some(line);
            }
            if let Some(breakage) = validator::check(entry) {
                self.pending = Some(format!("     ERROR: {}", breakage));
                return Some(line);
            }
        }

        None
    }
}
