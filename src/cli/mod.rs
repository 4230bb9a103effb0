//! # Command-Line Interface
//!
//! Flag-driven front end over the alias store.
//!
//! | Flag | Purpose |
//! |------|---------|
//! | `<alias>`, `-e` | Print the directory an alias resolves to |
//! | `-a`, `-r` | Add or remove an alias |
//! | `-l`, `--broken` | List all or broken aliases |
//! | `--clean`, `--sort-aliases` | Maintain the alias file |
//! | `--choices` | Alias names for bash completion |
//! | `--install` | Install the `jd` shell function |
//!
//! ## Output Formats
//!
//! `--format json` switches listings and status messages to JSON. The
//! default text output is what the shell function consumes.
//!
//! ## Verbose Mode
//!
//! `--verbose` (or `-v`) writes diagnostics to stderr:
//! ```bash
//! jdalias --verbose -e wo
//! ```

mod alias;
mod app;
mod install;
mod output;
mod prompt;

pub use app::{run, Action, Cli};
pub use install::{install, shell_function, source_into_shellrc, InstallReport, RcStatus};
pub use output::{Output, OutputFormat};
pub use prompt::PromptConfirm;
