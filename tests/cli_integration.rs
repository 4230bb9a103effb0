//! CLI integration tests for jdalias
//!
//! These drive the binary the way the `jd` shell function does, with the
//! alias file redirected into a temporary directory.

use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a command instance bound to an isolated home directory
fn jd_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("jdalias"));
    cmd.env("HOME", home)
        .env("JDALIAS_DEFS", defs_path(home))
        .current_dir(home);
    cmd
}

fn defs_path(home: &Path) -> PathBuf {
    home.join("aliases.defs")
}

/// Create a home directory with a few real target directories
fn setup_home() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("proj")).unwrap();
    fs::create_dir_all(dir.path().join("music")).unwrap();
    dir
}

fn write_defs(home: &Path, content: &str) {
    fs::write(defs_path(home), content).unwrap();
}

fn read_defs(home: &Path) -> String {
    fs::read_to_string(defs_path(home)).unwrap()
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn test_evaluate_scenario() {
    let home = setup_home();
    let home_str = home.path().display().to_string();
    write_defs(home.path(), &format!("work = ~/proj\nhome = {} # primary\n", home_str));

    jd_cmd(home.path())
        .args(["-e", "w"])
        .assert()
        .success()
        .stdout(format!("{}/proj\n", home_str));

    jd_cmd(home.path())
        .args(["-e", "2"])
        .assert()
        .success()
        .stdout(format!("{}\n", home_str));

    jd_cmd(home.path())
        .args(["-e", "x"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_bare_token_evaluates() {
    let home = setup_home();
    write_defs(home.path(), "foo = /f\nfoobar = /fb\n");

    jd_cmd(home.path()).arg("foo").assert().success().stdout("/f\n");
    jd_cmd(home.path()).arg("fo").assert().success().stdout("\n");
}

#[test]
fn test_evaluate_json() {
    let home = setup_home();
    write_defs(home.path(), "music = /m\n");

    let output = jd_cmd(home.path())
        .args(["-e", "mu", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["alias"], "music");
    assert_eq!(json["target"], "/m");
}

#[test]
fn test_explicit_file_overrides_environment() {
    let home = setup_home();
    write_defs(home.path(), "a = /from-env\n");
    let other = home.path().join("other.defs");
    fs::write(&other, "a = /from-flag\n").unwrap();

    jd_cmd(home.path())
        .args(["--file", other.to_str().unwrap(), "-e", "a"])
        .assert()
        .success()
        .stdout("/from-flag\n");
}

#[test]
fn test_parse_error_is_fatal() {
    let home = setup_home();
    write_defs(home.path(), "good = /g\n\nthis line is wrong\n");

    jd_cmd(home.path())
        .args(["-e", "good"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Failed to parse alias file"))
        .stderr(predicate::str::contains("line 3"))
        .stderr(predicate::str::contains(">> this line is wrong"));
}

#[test]
fn test_no_arguments_prints_hint_and_fails() {
    let home = setup_home();

    jd_cmd(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--install"));
}

// =============================================================================
// Mutations
// =============================================================================

#[test]
fn test_add_and_list() {
    let home = setup_home();
    let proj = home.path().join("proj");

    jd_cmd(home.path())
        .args(["-a", "proj", proj.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added alias \"proj\""));

    jd_cmd(home.path())
        .args(["-a", "here"])
        .current_dir(home.path().join("music"))
        .assert()
        .success();

    assert_eq!(
        read_defs(home.path()),
        format!(
            "proj = {}\nhere = {}\n",
            proj.display(),
            home.path().join("music").display()
        )
    );

    jd_cmd(home.path())
        .arg("-l")
        .assert()
        .success()
        .stdout(predicate::str::contains("  1: proj"))
        .stdout(predicate::str::contains("  2: here"));
}

#[test]
fn test_add_existing_prompts_and_declines() {
    let home = setup_home();
    write_defs(home.path(), "a = /old\n");

    jd_cmd(home.path())
        .args(["-a", "a", "/new"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(read_defs(home.path()), "a = /old\n");
}

#[test]
fn test_add_existing_confirmed() {
    let home = setup_home();
    write_defs(home.path(), "a = /old\n");

    jd_cmd(home.path())
        .args(["-a", "a", "/new"])
        .write_stdin("y\n")
        .assert()
        .success();

    assert_eq!(read_defs(home.path()), "a = /new\n");
}

#[test]
fn test_add_no_confirm_overwrites() {
    let home = setup_home();
    write_defs(home.path(), "a = /old\n");

    jd_cmd(home.path())
        .args(["-y", "-a", "a", "/new"])
        .assert()
        .success();

    assert_eq!(read_defs(home.path()), "a = /new\n");
}

#[test]
fn test_remove_by_index() {
    let home = setup_home();
    write_defs(home.path(), "a = /a\nb = /b\n");

    jd_cmd(home.path())
        .args(["-y", "-r", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed alias \"b\""));

    assert_eq!(read_defs(home.path()), "a = /a\n");
}

#[test]
fn test_remove_missing_reports_not_found() {
    let home = setup_home();
    write_defs(home.path(), "# hand edited\na = /a\n");

    jd_cmd(home.path())
        .args(["-y", "-r", "zzz"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Alias \"zzz\" not found."));

    assert_eq!(read_defs(home.path()), "# hand edited\na = /a\n");
}

#[test]
fn test_sort_aliases() {
    let home = setup_home();
    write_defs(home.path(), "zeta = /z\nalpha = /a\nmid = /m\n");

    jd_cmd(home.path())
        .arg("--sort-aliases")
        .assert()
        .success()
        .stdout(predicate::str::contains("  1: alpha"));

    assert_eq!(read_defs(home.path()), "alpha = /a\nmid = /m\nzeta = /z\n");
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_broken_and_clean() {
    let home = setup_home();
    let proj = home.path().join("proj");
    let gone = home.path().join("gone");
    write_defs(
        home.path(),
        &format!("proj = {}\ngone = {}\n", proj.display(), gone.display()),
    );

    jd_cmd(home.path())
        .arg("--broken")
        .assert()
        .success()
        .stdout(predicate::str::contains("gone"))
        .stdout(predicate::str::contains("ERROR: Path does not exist"))
        .stdout(predicate::str::contains("proj").not());

    jd_cmd(home.path())
        .arg("--clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removing broken alias \"gone\""));

    assert_eq!(read_defs(home.path()), format!("proj = {}\n", proj.display()));
}

#[test]
fn test_clean_quiet() {
    let home = setup_home();
    write_defs(home.path(), "gone = /definitely/not/here\n");

    jd_cmd(home.path())
        .args(["--clean", "-q"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_defs(home.path()), "");
}

// =============================================================================
// Shell integration
// =============================================================================

#[test]
fn test_choices() {
    let home = setup_home();

    jd_cmd(home.path()).arg("--choices").assert().success().stdout("\n");

    write_defs(home.path(), "a = /a\nb = /b\n");
    jd_cmd(home.path()).arg("--choices").assert().success().stdout("a b\n");
}

#[test]
fn test_empty_list_message() {
    let home = setup_home();

    jd_cmd(home.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No aliases defined in"));
}

#[test]
fn test_install_writes_wrapper() {
    let home = setup_home();
    fs::write(home.path().join(".bashrc"), "# rc\n").unwrap();

    jd_cmd(home.path()).arg("--install").assert().success();

    let script = home.path().join(".jdalias").join("jd.sh");
    assert!(script.is_file());
    assert!(home.path().join(".jdalias").join("jdalias").is_file());

    let rc = fs::read_to_string(home.path().join(".bashrc")).unwrap();
    assert!(rc.contains(&format!(". {}", script.display())));
}
