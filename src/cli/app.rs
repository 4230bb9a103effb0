//! Main CLI application structure
//!
//! The interface is flag based rather than subcommand based: the `jd` shell
//! function forwards anything starting with `-` verbatim and calls `-e`,
//! `-l` and `--choices` itself.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use super::output::{Output, OutputFormat};
use super::{alias, install};
use crate::storage::{AliasStore, Config};
use crate::SHELL_FUNCTION;

#[derive(Parser)]
#[command(name = "jdalias")]
#[command(author, version, about = "Directory alias manager behind the `jd` shell function")]
#[command(override_usage = "jd [options] <alias> [<directory>]")]
#[command(
    long_about = "If no options are given, prints the directory specified by ALIAS (which can be \
                  given by its numerical list index or partially, as long as enough characters \
                  are given to identify it unambiguously). Otherwise performs alias management \
                  as dictated by options."
)]
#[command(group(
    ArgGroup::new("action")
        .args(["add", "list", "remove", "evaluate", "sort_aliases", "broken", "clean", "install", "choices"])
))]
pub struct Cli {
    /// Add <alias>, mapping it to <directory> or the current directory
    #[arg(short = 'a', long, requires = "alias")]
    pub add: bool,

    /// List available aliases
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Remove <alias>
    #[arg(short = 'r', long, requires = "alias")]
    pub remove: bool,

    /// Do not prompt before overwriting or removing aliases
    #[arg(short = 'y', long)]
    pub no_confirm: bool,

    /// Print the directory <alias> resolves to, or a blank line
    #[arg(short = 'e', long = "eval", requires = "alias")]
    pub evaluate: bool,

    /// Sort alias definitions by name and save
    #[arg(long)]
    pub sort_aliases: bool,

    /// List broken aliases
    #[arg(long)]
    pub broken: bool,

    /// Remove broken aliases
    #[arg(long)]
    pub clean: bool,

    /// Do not report each alias removed by --clean
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Install the jd shell function for the current user
    #[arg(long)]
    pub install: bool,

    /// Print all aliases separated by spaces (for completion)
    #[arg(long)]
    pub choices: bool,

    /// Alias file to use (overrides $JDALIAS_DEFS)
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Alias name, list index, or unambiguous prefix
    pub alias: Option<String>,

    /// Target directory for --add
    pub directory: Option<String>,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Evaluate(String),
    Add {
        alias: String,
        directory: Option<String>,
    },
    Remove(String),
    List,
    Broken,
    Clean,
    Sort,
    Choices,
    Install,
}

impl Cli {
    /// Maps the parsed flags to an action
    pub fn action(&self) -> Result<Action> {
        let action = if self.install {
            Action::Install
        } else if self.list {
            Action::List
        } else if self.sort_aliases {
            Action::Sort
        } else if self.broken {
            Action::Broken
        } else if self.clean {
            Action::Clean
        } else if self.choices {
            Action::Choices
        } else {
            let alias = self.alias.clone().with_context(|| {
                format!(
                    "No alias given. Run \"jdalias --install\" to set up the \"{}\" shell function, then invoke it as \"{} <alias>\".",
                    SHELL_FUNCTION, SHELL_FUNCTION
                )
            })?;

            if self.add {
                Action::Add {
                    alias,
                    directory: self.directory.clone(),
                }
            } else if self.remove {
                Action::Remove(alias)
            } else {
                Action::Evaluate(alias)
            }
        };

        Ok(action)
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("jdalias starting");

    let action = cli.action()?;
    output.verbose(&format!("Action: {:?}", action));

    if action == Action::Install {
        return install::run(&output);
    }

    let config = Config::load(cli.file.as_deref())?;
    output.verbose_ctx("config", &format!("Alias file: {}", config.alias_file.display()));

    let mut store = AliasStore::open(&config)?;
    output.verbose_ctx("load", &format!("Loaded {} aliases", store.len()));
    for duplicate in store.duplicates() {
        output.verbose_ctx(
            "load",
            &format!("Alias \"{}\" is defined more than once; the last definition wins", duplicate),
        );
    }

    match action {
        Action::Evaluate(token) => alias::evaluate(&output, &store, &token)?,
        Action::Add { alias: name, directory } => {
            alias::add(&output, &mut store, &name, directory.as_deref(), cli.no_confirm)?
        }
        Action::Remove(token) => alias::remove(&output, &mut store, &token, cli.no_confirm)?,
        Action::List => alias::list(&output, &store, false)?,
        Action::Broken => alias::list(&output, &store, true)?,
        Action::Clean => alias::clean(&output, &mut store, cli.quiet)?,
        Action::Sort => alias::sort(&output, &mut store)?,
        Action::Choices => alias::choices(&output, &store)?,
        Action::Install => unreachable!("handled before loading the store"),
    }

    output.verbose("Command completed successfully");
    Ok(())
}
