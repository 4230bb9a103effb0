//! # Storage Layer
//!
//! Persistence for alias definitions.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Aliases | `alias = /path` lines | `~/.jdalias/jdalias.defs` or `$JDALIAS_DEFS` |
//! | Wrapper | bash script | `~/.jdalias/jd.sh` |
//!
//! ## Concurrency Safety
//!
//! - Reads take a shared `fs2` lock, writes an exclusive one
//! - Writes are atomic (temp file + rename)
//! - Two processes mutating at once still race; the last writer wins
//!
//! ## Key Types
//!
//! - [`AliasFile`] - Parse and write the definition file
//! - [`AliasStore`] - Ordered aliases with add/remove/sort/clean
//! - [`Config`] - Alias file location and path context

mod alias_file;
mod config;
mod store;
mod validator;

pub use alias_file::{AliasFile, ParseError};
pub use config::{Config, ConfigError, ALIAS_FILE_NAME, ENV_ALIAS_FILE, INSTALL_DIR_NAME};
pub use store::{AddOutcome, AliasStore, BrokenAlias, Confirm, Listing, RemoveOutcome};
pub use validator::{check, is_broken, Breakage};
