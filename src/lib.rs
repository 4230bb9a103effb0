//! jdalias - directory aliases for the shell
//!
//! Short names map to directories in a plain text file. The `jd` shell
//! function resolves a name (exactly, by list index, or by unambiguous
//! prefix) through this crate and changes directory to the result.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{AliasEntry, Match, NoMatch};
pub use storage::{AliasFile, AliasStore, Config};

/// Name of the shell function users type
pub const SHELL_FUNCTION: &str = "jd";
