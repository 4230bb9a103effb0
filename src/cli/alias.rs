//! Alias CLI commands

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::output::Output;
use super::prompt;
use crate::storage::{AddOutcome, AliasStore, Confirm, RemoveOutcome};

#[derive(Serialize)]
struct ListedAlias<'a> {
    index: usize,
    alias: &'a str,
    target: &'a Path,
}

/// Prints the target `token` resolves to, or an empty line
pub fn evaluate(output: &Output, store: &AliasStore, token: &str) -> Result<()> {
    let resolved = store.match_alias(token);
    output.verbose_ctx("eval", &format!("'{}': {}", token, resolved.describe()));

    if output.is_json() {
        let entry = store.lookup(token);
        output.data(&serde_json::json!({
            "token": token,
            "alias": entry.map(|e| e.alias.as_str()),
            "target": entry.map(|e| e.target.display().to_string()),
        }));
    } else {
        println!("{}", store.evaluate(token));
    }

    Ok(())
}

pub fn add(
    output: &Output,
    store: &mut AliasStore,
    alias: &str,
    directory: Option<&str>,
    no_confirm: bool,
) -> Result<()> {
    // no directory means the current one
    let directory = directory.unwrap_or(".");
    output.verbose_ctx("add", &format!("Adding '{}' -> '{}'", alias, directory));

    let mut terminal = prompt::terminal();
    let confirm: Option<&mut dyn Confirm> = if no_confirm { None } else { Some(&mut terminal) };

    match store.add_alias(alias, directory, confirm)? {
        AddOutcome::Added(entry) => {
            output.success(&format!("Added alias \"{}\" => {}", entry.alias, entry.target.display()));
        }
        AddOutcome::Replaced { entry, previous } => {
            output.success(&format!(
                "Replaced alias \"{}\": {} => {}",
                entry.alias,
                previous.display(),
                entry.target.display()
            ));
        }
        AddOutcome::Declined => {
            output.success(&format!("Alias \"{}\" left unchanged.", alias));
        }
    }

    Ok(())
}

pub fn remove(output: &Output, store: &mut AliasStore, token: &str, no_confirm: bool) -> Result<()> {
    output.verbose_ctx(
        "remove",
        &format!("'{}': {}", token, store.match_alias(token).describe()),
    );

    let mut terminal = prompt::terminal();
    let confirm: Option<&mut dyn Confirm> = if no_confirm { None } else { Some(&mut terminal) };

    match store.remove_alias(token, confirm)? {
        RemoveOutcome::Removed(entry) => {
            output.success(&format!("Removed alias \"{}\" => {}", entry.alias, entry.target.display()));
        }
        RemoveOutcome::Declined => {
            output.success(&format!("Alias \"{}\" left unchanged.", token));
        }
        RemoveOutcome::NotFound => {
            output.error(&format!("Alias \"{}\" not found.", token));
        }
    }

    Ok(())
}

/// Lists all aliases, or only the broken ones
pub fn list(output: &Output, store: &AliasStore, show_broken: bool) -> Result<()> {
    if output.is_json() {
        if show_broken {
            output.data(&store.broken());
        } else {
            let items: Vec<_> = store
                .entries()
                .iter()
                .enumerate()
                .map(|(pos, e)| ListedAlias {
                    index: pos + 1,
                    alias: &e.alias,
                    target: &e.target,
                })
                .collect();
            output.data(&items);
        }
        return Ok(());
    }

    for line in store.list_aliases(show_broken) {
        println!("{}", line);
    }
    Ok(())
}

/// Sorts aliases by name and lists the result
pub fn sort(output: &Output, store: &mut AliasStore) -> Result<()> {
    store.sort_aliases()?;
    output.verbose_ctx("sort", &format!("Sorted {} aliases", store.len()));
    list(output, store, false)
}

/// Removes broken aliases
pub fn clean(output: &Output, store: &mut AliasStore, quiet: bool) -> Result<()> {
    let removed = store.clean_aliases()?;
    output.verbose_ctx("clean", &format!("Removed {} broken aliases", removed.len()));

    if output.is_json() {
        output.data(&removed);
    } else if !quiet {
        for broken in &removed {
            println!(
                "Removing broken alias \"{}\": {}",
                broken.entry.alias,
                broken.entry.target.display()
            );
        }
    }

    Ok(())
}

/// Prints alias names for shell completion
pub fn choices(output: &Output, store: &AliasStore) -> Result<()> {
    if output.is_json() {
        let names: Vec<&str> = store.entries().iter().map(|e| e.alias.as_str()).collect();
        output.data(&names);
    } else {
        println!("{}", store.choices());
    }
    Ok(())
}
