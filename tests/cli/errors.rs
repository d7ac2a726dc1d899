//! Pre-flight and argument errors.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_missing_session_fails_before_vault_call() {
    let t = Test::new();
    t.write(".env", "A=bwenv://ID1/fields/F1\n");

    let output = t
        .cmd_no_session()
        .args(["run", "echo", "hi"])
        .output()
        .unwrap();

    assert_refused(&output, "no Bitwarden session token was provided");
    assert_hinted(&output, "bw unlock");
    assert!(t.bw_calls().is_empty());
}

#[test]
fn test_missing_session_generate() {
    let t = Test::new();

    t.cmd_no_session()
        .args(["generate", "ID1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("session token"));

    assert!(t.bw_calls().is_empty());
}

#[test]
fn test_session_flag() {
    let t = Test::new();
    t.write(".env", "");

    t.cmd_no_session()
        .args(["--session", "flag-token", "run", "true"])
        .assert()
        .success();

    assert_eq!(t.bw_calls(), vec!["status --session flag-token"]);
}

#[test]
fn test_session_flag_takes_precedence() {
    let t = Test::new();
    t.write(".env", "");

    t.cmd()
        .args(["--session", "flag-token", "run", "true"])
        .assert()
        .success();

    assert_eq!(t.bw_calls(), vec!["status --session flag-token"]);
}

#[test]
fn test_session_from_env() {
    let t = Test::new();
    t.write(".env", "");

    t.cmd().args(["run", "true"]).assert().success();

    assert_eq!(t.bw_calls(), vec![format!("status --session {}", SESSION)]);
}

#[test]
fn test_locked_vault_fails() {
    let t = Test::new().with_item("ID1", ITEM_ID1);
    t.set_status("locked");
    t.write(".env", "A=bwenv://ID1/fields/F1\n");

    let output = t.run(&["echo", "launched"]);

    assert_refused(&output, "invalid Bitwarden session token: vault is locked");
    assert_hinted(&output, "bw unlock");
    assert_not_launched(&output, "launched");
    t.assert_lookups(&[]);
}

#[test]
fn test_unauthenticated_vault_fails_generate() {
    let t = Test::new().with_item("ID1", ITEM_ID1);
    t.set_status("unauthenticated");

    let output = t.generate(&["ID1"]);

    assert_refused(&output, "vault is unauthenticated");
    t.assert_lookups(&[]);
    t.assert_no_env_file(".env");
}

#[test]
fn test_bw_binary_not_found() {
    let t = Test::new();

    t.cmd()
        .env("BWENV_BW_BIN", t.dir.path().join("no-such-bw"))
        .args(["run", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bitwarden CLI not found"));
}

#[test]
fn test_run_requires_command() {
    let t = Test::new();

    t.cmd().arg("run").assert().failure();
    assert!(t.bw_calls().is_empty());
}

#[test]
fn test_generate_requires_name() {
    let t = Test::new();

    t.cmd().arg("generate").assert().failure();
    assert!(t.bw_calls().is_empty());
}

#[test]
fn test_completions_need_no_session() {
    let t = Test::new();

    t.cmd_no_session()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bwenv"));
}

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd_no_session()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("generate"));
}
