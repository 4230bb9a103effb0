//! Configuration for jdalias
//!
//! The alias file location is resolved once, in this order:
//!
//! 1. an explicit path (the `--file` flag)
//! 2. the `JDALIAS_DEFS` environment variable
//! 3. `~/.jdalias/jdalias.defs`
//!
//! Explicit and environment paths are tilde-expanded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use thiserror::Error;

use crate::domain::PathContext;

/// Environment variable overriding the alias file location
pub const ENV_ALIAS_FILE: &str = "JDALIAS_DEFS";

/// Directory under the home directory holding the installation and alias file
pub const INSTALL_DIR_NAME: &str = ".jdalias";

/// File name of the default alias file
pub const ALIAS_FILE_NAME: &str = "jdalias.defs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where alias definitions are read from and written to
    pub alias_file: PathBuf,

    /// Home and working directories used to resolve targets
    pub paths: PathContext,
}

impl Config {
    /// Resolves configuration from the process environment
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let home = Self::home_dir()?;
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let env_value = std::env::var(ENV_ALIAS_FILE).ok();

        Ok(Self::resolve(
            explicit,
            env_value.as_deref(),
            PathContext::new(home, cwd),
        ))
    }

    /// Applies the precedence rules to already-gathered inputs
    pub fn resolve(explicit: Option<&str>, env_value: Option<&str>, paths: PathContext) -> Self {
        let alias_file = explicit
            .filter(|p| !p.is_empty())
            .or(env_value.filter(|p| !p.is_empty()))
            .map(|p| paths.resolve(p))
            .unwrap_or_else(|| Self::default_alias_file(paths.home()));

        Self { alias_file, paths }
    }

    /// Returns the user's home directory
    pub fn home_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::NoHomeDirectory.into())
    }

    /// Returns `<home>/.jdalias`
    pub fn install_dir(home: &Path) -> PathBuf {
        home.join(INSTALL_DIR_NAME)
    }

    /// Returns `<home>/.jdalias/jdalias.defs`
    pub fn default_alias_file(home: &Path) -> PathBuf {
        Self::install_dir(home).join(ALIAS_FILE_NAME)
    }
}
