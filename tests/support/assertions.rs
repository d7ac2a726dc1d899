//! Assertions over bwenv runs, the fake vault's call log, and env files.
//!
//! Output is produced with `NO_COLOR=1`, so warnings start with `⚠` and
//! errors with `✗` on stderr.

use std::process::Output;

use super::{Test, SESSION};

/// What reached stdout: the launched command's output, or a success line.
pub fn child_stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Everything bwenv wrote to stderr: warnings, errors, hints and logs.
pub fn diagnostics(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// bwenv (and the command it launched) exited 0.
pub fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "bwenv exited with {:?}:\n{}",
        output.status.code(),
        diagnostics(output)
    );
}

/// The launched command ran and printed `expected`.
pub fn assert_child_printed(output: &Output, expected: &str) {
    assert_ok(output);
    let out = child_stdout(output);
    assert!(
        out.contains(expected),
        "child output missing {:?}, got: {}",
        expected,
        out
    );
}

/// The launched command never printed `marker`, so it never ran.
pub fn assert_not_launched(output: &Output, marker: &str) {
    let out = child_stdout(output);
    assert!(
        !out.contains(marker),
        "command was launched anyway: {}",
        out
    );
}

/// bwenv failed and its error report mentions `message`.
pub fn assert_refused(output: &Output, message: &str) {
    assert!(!output.status.success(), "bwenv unexpectedly succeeded");
    let err = diagnostics(output);
    let report = err.find('✗').map(|i| &err[i..]).unwrap_or("");
    assert!(
        report.contains(message),
        "error report missing {:?}, got: {}",
        message,
        err
    );
}

/// bwenv suggested a next step mentioning `text`.
pub fn assert_hinted(output: &Output, text: &str) {
    let err = diagnostics(output);
    assert!(
        err.lines().any(|l| l.starts_with('→') && l.contains(text)),
        "no hint mentioning {:?}, got: {}",
        text,
        err
    );
}

/// A warning line mentions `message`.
pub fn assert_warned(output: &Output, message: &str) {
    let err = diagnostics(output);
    assert!(
        err.lines().any(|l| l.starts_with('⚠') && l.contains(message)),
        "no warning mentioning {:?}, got: {}",
        message,
        err
    );
}

impl Test {
    /// Assert the exact `bw get item` searches made so far, in order.
    pub fn assert_lookups(&self, searches: &[&str]) {
        let expected: Vec<String> = searches
            .iter()
            .map(|s| format!("get item {} --session {}", s, SESSION))
            .collect();
        assert_eq!(self.item_lookups(), expected);
    }

    /// Assert that `file` holds exactly these lines.
    pub fn assert_env_lines(&self, file: &str, lines: &[&str]) {
        let content = self.read(file);
        assert!(content.ends_with('\n'), "{} lacks a trailing newline", file);
        assert_eq!(content.lines().collect::<Vec<_>>(), lines);
    }

    /// Assert that nothing was written to `file`.
    pub fn assert_no_env_file(&self, file: &str) {
        assert!(
            !self.dir.path().join(file).exists(),
            "{} should not exist",
            file
        );
    }
}
