//! Integration tests for the PassVault CLI.
//!
//! These exercise the binary end-to-end with `assert_cmd`. Commands that
//! reach the OS secure store or wait on an interactive prompt are hard
//! to automate, so the focus is on the self-contained surface: help and
//! version, the password generator, completions, argument validation,
//! and the settings file (redirected into a temp dir).

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the passvault binary.
fn passvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("passvault").expect("binary should exist")
}

// ---------------------------------------------------------------------------
// Help and version
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    passvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personal credential vault locked behind the OS secure store",
        ))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("copy"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("rm"))
        .stdout(predicate::str::contains("category"))
        .stdout(predicate::str::contains("settings"))
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag_shows_version() {
    passvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_a_password_of_the_requested_length() {
    passvault()
        .args(["generate", "--length", "32"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Za-z0-9!@#$%^&*\-_=+?]{32}\n$").unwrap());
}

#[test]
fn generate_no_symbols_sticks_to_letters_and_digits() {
    passvault()
        .args(["generate", "--no-symbols"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Za-z0-9]{20}\n$").unwrap());
}

#[test]
fn generate_rejects_a_tiny_length() {
    passvault()
        .args(["generate", "--length", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("length must be between"));
}

// ---------------------------------------------------------------------------
// Completions
// ---------------------------------------------------------------------------

#[test]
fn completions_bash_emits_a_script() {
    passvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

#[test]
fn completions_unknown_shell_fails() {
    passvault()
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell"));
}

// ---------------------------------------------------------------------------
// Argument validation (fails before any store access)
// ---------------------------------------------------------------------------

#[test]
fn rm_with_no_selector_fails() {
    passvault()
        .arg("rm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to remove"));
}

#[test]
fn rm_refuses_mixed_titles_and_positions() {
    passvault()
        .args(["rm", "Gmail", "--at", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn category_edit_with_no_changes_fails() {
    passvault()
        .args(["category", "edit", "Work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

// ---------------------------------------------------------------------------
// Settings (redirected into a temp dir; never requires an unlock)
// ---------------------------------------------------------------------------

#[test]
fn settings_show_prints_the_defaults() {
    let tmp = TempDir::new().unwrap();

    passvault()
        .args(["--config-dir", tmp.path().to_str().unwrap()])
        .args(["settings", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("require_gate_on_launch = true"))
        .stdout(predicate::str::contains("clipboard_clear_secs = 60"));
}

#[test]
fn settings_changes_persist_across_invocations() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();

    passvault()
        .args(["--config-dir", dir])
        .args(["settings", "--clipboard-clear", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved."));

    passvault()
        .args(["--config-dir", dir])
        .args(["settings", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clipboard_clear_secs = 90"));
}

#[test]
fn disabling_the_gate_warns_about_the_open_vault() {
    let tmp = TempDir::new().unwrap();

    passvault()
        .args(["--config-dir", tmp.path().to_str().unwrap()])
        .args(["settings", "--require-gate", "false"])
        .assert()
        .success()
        .stderr(predicate::str::contains("stays open"));
}
