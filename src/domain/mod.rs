//! Domain models for jdalias
//!
//! Alias entries, path resolution, and the matching algorithm. Nothing in
//! here touches the filesystem.

mod entry;
mod path;
mod resolve;

pub use entry::{validate_alias, AliasEntry, EntryError};
pub use path::{normalize, PathContext};
pub use resolve::{match_alias, Match, NoMatch};
