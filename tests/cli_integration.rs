//! Integration tests for the SureLock CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Passwords come from the environment so no command ever waits on an
//! interactive prompt.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "masterpw";

/// Helper: get a Command pointing at the surelock binary.
fn surelock() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("surelock").expect("binary should exist");
    cmd.env_remove("SURELOCK_FILE")
        .env_remove("SURELOCK_LOG")
        .env_remove("SURELOCK_PASSWORD")
        .env_remove("SURELOCK_ENTRY_PASSWORD");
    cmd
}

/// Helper: a project dir with cheap key derivation configured.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child(".surelock.toml")
        .write_str("kdf_iterations = 1000\n")
        .unwrap();
    tmp
}

/// Helper: run a command inside `dir` with the master password set.
fn run_in(dir: &TempDir, args: &[&str]) -> Command {
    let mut cmd = surelock();
    cmd.args(args)
        .current_dir(dir.path())
        .env("SURELOCK_PASSWORD", MASTER);
    cmd
}

/// Helper: init a vault and add one entry.
fn project_with_entry(entry: &str, password: &str) -> TempDir {
    let tmp = project();
    run_in(&tmp, &["init"]).assert().success();
    run_in(&tmp, &["add", entry, "me", "-d", "test account"])
        .env("SURELOCK_ENTRY_PASSWORD", password)
        .assert()
        .success();
    tmp
}

// ---------------------------------------------------------------------------
// Help and argument parsing
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    surelock()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("view"))
        .stdout(predicate::str::contains("del"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("add-category"))
        .stdout(predicate::str::contains("delete-category"));
}

#[test]
fn version_flag_shows_version() {
    surelock()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("surelock"));
}

#[test]
fn no_args_shows_help() {
    surelock()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn add_without_username_fails() {
    surelock().args(["add", "gmail"]).assert().failure();
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_vault_file() {
    let tmp = project();
    run_in(&tmp, &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault created"));

    tmp.child("surelock.db").assert(predicate::path::exists());
}

#[test]
fn init_twice_fails() {
    let tmp = project();
    run_in(&tmp, &["init"]).assert().success();
    run_in(&tmp, &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_respects_file_flag() {
    let tmp = project();
    run_in(&tmp, &["init", "-f", "custom.db"]).assert().success();

    tmp.child("custom.db").assert(predicate::path::exists());
    tmp.child("surelock.db").assert(predicate::path::missing());
}

// ---------------------------------------------------------------------------
// add / view / del
// ---------------------------------------------------------------------------

#[test]
fn add_then_view_prints_password() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    run_in(&tmp, &["view", "gmail", "--no-clipboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cr3t"));
}

#[test]
fn add_reads_entry_password_from_stdin() {
    let tmp = project();
    run_in(&tmp, &["init"]).assert().success();
    run_in(&tmp, &["add", "github", "octo", "work"])
        .write_stdin("t0ken\n")
        .assert()
        .success();

    run_in(&tmp, &["view", "github", "work", "--no-clipboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t0ken"));
}

#[test]
fn add_duplicate_entry_fails() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    run_in(&tmp, &["add", "gmail", "me"])
        .env("SURELOCK_ENTRY_PASSWORD", "other")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    run_in(&tmp, &["view", "gmail", "--no-clipboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cr3t"));
}

#[test]
fn view_with_wrong_master_password_fails() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    run_in(&tmp, &["view", "gmail", "--no-clipboard"])
        .env("SURELOCK_PASSWORD", "not-the-master")
        .assert()
        .failure()
        .stdout(predicate::str::contains("s3cr3t").not())
        .stderr(predicate::str::contains("wrong password"));
}

#[test]
fn view_missing_entry_fails() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    run_in(&tmp, &["view", "github", "--no-clipboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry named 'github'"));
}

#[test]
fn view_on_missing_vault_fails() {
    let tmp = project();

    run_in(&tmp, &["view", "gmail", "--no-clipboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("surelock init"));
}

#[test]
fn del_removes_entry() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    run_in(&tmp, &["del", "gmail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 'gmail'"));

    run_in(&tmp, &["view", "gmail", "--no-clipboard"])
        .assert()
        .failure();
}

#[test]
fn del_missing_entry_is_not_an_error() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    run_in(&tmp, &["delete", "nothing-here"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"));
}

// ---------------------------------------------------------------------------
// show and categories
// ---------------------------------------------------------------------------

#[test]
fn show_lists_entries_without_passwords() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    run_in(&tmp, &["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gmail"))
        .stdout(predicate::str::contains("test account"))
        .stdout(predicate::str::contains("s3cr3t").not());
}

#[test]
fn show_categories_with_counts() {
    let tmp = project_with_entry("gmail", "s3cr3t");
    run_in(&tmp, &["add_category", "work"]).assert().success();

    run_in(&tmp, &["show", "-c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("root"))
        .stdout(predicate::str::contains("work"));
}

#[test]
fn show_missing_category_fails() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    run_in(&tmp, &["show", "bank"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No category named 'bank'"));
}

#[test]
fn add_category_twice_is_reported() {
    let tmp = project();
    run_in(&tmp, &["init"]).assert().success();
    run_in(&tmp, &["add-category", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created category 'work'"));
    run_in(&tmp, &["add-category", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn add_category_rejects_bad_name() {
    let tmp = project();
    run_in(&tmp, &["init"]).assert().success();
    run_in(&tmp, &["add-category", "bad name;"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid name"));
}

#[test]
fn delete_category_with_force() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    run_in(&tmp, &["delete_category", "root", "--force"])
        .assert()
        .success();

    run_in(&tmp, &["view", "gmail", "--no-clipboard"])
        .assert()
        .failure();
}

#[test]
fn delete_missing_category_fails() {
    let tmp = project();
    run_in(&tmp, &["init"]).assert().success();
    run_in(&tmp, &["delete-category", "nope", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No category named 'nope'"));
}

// ---------------------------------------------------------------------------
// completions
// ---------------------------------------------------------------------------

#[test]
fn completions_bash_prints_script() {
    surelock()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("surelock"));
}

#[test]
fn completions_unknown_shell_fails() {
    surelock().args(["completions", "csh"]).assert().failure();
}

// ---------------------------------------------------------------------------
// Output and failure hygiene
// ---------------------------------------------------------------------------

#[test]
fn view_stdout_is_only_the_password() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    // Clipboard status (copied or not) goes to stderr.
    run_in(&tmp, &["view", "gmail"])
        .assert()
        .success()
        .stdout(predicate::eq("s3cr3t\n"));

    run_in(&tmp, &["view", "gmail", "--no-clipboard"])
        .assert()
        .success()
        .stdout(predicate::eq("s3cr3t\n"));
}

#[test]
fn failed_add_leaves_no_empty_category() {
    let tmp = project_with_entry("gmail", "s3cr3t");

    run_in(&tmp, &["add", "jira", "alice", "work"])
        .env("SURELOCK_PASSWORD", "not-the-master")
        .env("SURELOCK_ENTRY_PASSWORD", "pa55")
        .assert()
        .failure();

    run_in(&tmp, &["show", "-c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("root"))
        .stdout(predicate::str::contains("work").not());
}

#[test]
fn add_rejects_bad_category_before_prompting() {
    let tmp = project();
    run_in(&tmp, &["init"]).assert().success();

    run_in(&tmp, &["add", "gmail", "me", "bad name;"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid name"));
}
