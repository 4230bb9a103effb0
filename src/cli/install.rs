//! Installer for the `jd` shell function
//!
//! A child process cannot change its parent shell's directory, so `jd` is a
//! bash function that asks this binary for a path and runs `cd` itself.
//! Installation copies the binary into `~/.jdalias`, writes the function and
//! its completion to `~/.jdalias/jd.sh`, and sources that script from
//! `~/.bashrc`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::output::Output;
use crate::storage::Config;
use crate::SHELL_FUNCTION;

/// Name of the generated wrapper script
pub const SHELL_SCRIPT_NAME: &str = "jd.sh";

/// Name of the installed binary
pub const BINARY_NAME: &str = "jdalias";

const SHELL_TEMPLATE: &str = r#"#####################################################
# Wrapper and bash completion for jdalias.
# Auto-written by installer on @TIMESTAMP@.
# Source this from ~/.bashrc or the equivalent.
# Invoke via "@FUNC@".

# if the jdalias binary moves, point this at the new location
JDALIAS='@BINARY@'

function @FUNC@() {
    if [ $# = 0 ]
    then
        # no arguments: list aliases
        "$JDALIAS" -l
    elif [ "${1:0:1}" = '-' ]
    then
        # options go straight to the alias manager
        "$JDALIAS" "$@"
    else
        target=$("$JDALIAS" -e "$1")
        if [ -n "$target" ]
        then
            echo "$target"
            cd "$target"
        else
            echo "Directory alias \"$1\" not found or could not be matched unambiguously"
            echo "to a known alias. Use @FUNC@ --list to see available aliases."
        fi
    fi
}

######################################################
# Bash completion for @FUNC@
_@FUNC@()
{
    local cur opts
    COMPREPLY=()
    cur="${COMP_WORDS[COMP_CWORD]}"
    opts=$("$JDALIAS" --choices)
    COMPREPLY=( $(compgen -W "${opts}" -- "${cur}") )
    return 0
}

complete -F _@FUNC@ @FUNC@
"#;

/// Renders the wrapper function and completion for `binary`
pub fn shell_function(binary: &Path, timestamp: &str) -> String {
    SHELL_TEMPLATE
        .replace("@TIMESTAMP@", timestamp)
        .replace("@FUNC@", SHELL_FUNCTION)
        .replace("@BINARY@", &binary.display().to_string())
}

/// What happened to the shell startup file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RcStatus {
    Appended,
    AlreadySourced,
    Missing,
}

/// Result of an installation
#[derive(Debug, Serialize)]
pub struct InstallReport {
    pub install_dir: PathBuf,
    pub binary: PathBuf,
    pub binary_copied: bool,
    pub script: PathBuf,
    pub shellrc: PathBuf,
    pub rc_status: RcStatus,
}

fn source_line(script: &Path) -> String {
    format!(". {}", script.display())
}

/// Appends a line sourcing `script` to `shellrc` unless one is already there
///
/// A missing startup file is left alone.
pub fn source_into_shellrc(shellrc: &Path, script: &Path) -> Result<RcStatus> {
    if !shellrc.exists() {
        return Ok(RcStatus::Missing);
    }

    let line = source_line(script);
    let content = fs::read_to_string(shellrc)
        .with_context(|| format!("Failed to read {}", shellrc.display()))?;

    if content.lines().any(|l| l.trim() == line) {
        return Ok(RcStatus::AlreadySourced);
    }

    let separator = if content.is_empty() || content.ends_with('\n') { "" } else { "\n" };
    let new_content = format!(
        "{}{}\n# source jdalias wrapper function\n{}\n",
        content, separator, line
    );

    fs::write(shellrc, new_content)
        .with_context(|| format!("Failed to update {}", shellrc.display()))?;

    Ok(RcStatus::Appended)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Installs `exe` and the shell wrapper under `home`
pub fn install(home: &Path, exe: &Path, timestamp: &str) -> Result<InstallReport> {
    let install_dir = Config::install_dir(home);

    if install_dir.exists() && !install_dir.is_dir() {
        anyhow::bail!(
            "File called \"{}\" already exists. Cannot create installation directory.",
            install_dir.display()
        );
    }
    fs::create_dir_all(&install_dir)
        .with_context(|| format!("Failed to create directory: {}", install_dir.display()))?;

    let binary = install_dir.join(BINARY_NAME);
    let binary_copied = if same_file(exe, &binary) {
        false
    } else {
        fs::copy(exe, &binary).with_context(|| {
            format!("Failed to copy {} to {}", exe.display(), binary.display())
        })?;
        set_executable(&binary)?;
        true
    };

    let script = install_dir.join(SHELL_SCRIPT_NAME);
    fs::write(&script, shell_function(&binary, timestamp))
        .with_context(|| format!("Failed to write {}", script.display()))?;

    let shellrc = home.join(".bashrc");
    let rc_status = source_into_shellrc(&shellrc, &script)?;

    Ok(InstallReport {
        install_dir,
        binary,
        binary_copied,
        script,
        shellrc,
        rc_status,
    })
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to make {} executable", path.display()))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Run the install command
pub fn run(output: &Output) -> Result<()> {
    let home = Config::home_dir()?;
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    output.verbose_ctx("install", &format!("Installing from {}", exe.display()));
    let report = install(&home, &exe, &timestamp)?;

    if output.is_json() {
        output.data(&report);
        return Ok(());
    }

    println!("Installation directory: {}", report.install_dir.display());
    if report.binary_copied {
        println!("    Alias manager copied to {}", report.binary.display());
    } else {
        println!("    Alias manager already installed at {}, not copied", report.binary.display());
    }
    println!("    Shell function written to {}", report.script.display());

    let line = source_line(&report.script);
    match report.rc_status {
        RcStatus::Appended => println!("    {} now sources the shell function", report.shellrc.display()),
        RcStatus::AlreadySourced => println!("    {} already sources the shell function", report.shellrc.display()),
        RcStatus::Missing => {
            output.error(&format!(
                "Could not find shell resource file \"{}\".\nAdd the following line to your shell startup file:\n\n    {}\n",
                report.shellrc.display(),
                line
            ));
        }
    }

    println!();
    println!("Start a new shell to use \"{}\".", SHELL_FUNCTION);
    println!(
        "Use \"{} -a <alias> [</path/to/directory>]\" to define aliases and \"{} --help\" for options.",
        SHELL_FUNCTION, SHELL_FUNCTION
    );

    Ok(())
}
