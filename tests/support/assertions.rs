//! Assertions over captured command output.
//!
//! Failures dump both streams: caisson writes errors to stderr but
//! remediation hints to stdout, and a useful panic message needs both.

use std::process::Output;

/// Panic with both streams when the command did not exit 0.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed\nstderr: {}\nstdout: {}",
            stderr(output),
            stdout(output)
        );
    }
}

/// Panic with stdout when the command unexpectedly exited 0.
pub fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "expected a nonzero exit, command succeeded\nstdout: {}",
            stdout(output)
        );
    }
}

/// Captured stdout, lossily decoded.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Captured stderr, lossily decoded.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parse stdout as JSON, panicking on anything unparseable.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let out = stdout(output);
    serde_json::from_str(&out).unwrap_or_else(|e| panic!("stdout is not json ({}): {}", e, out))
}

/// Assert stdout contains `expected`.
pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        out.contains(expected),
        "stdout missing '{}', got: {}",
        expected,
        out
    );
}

/// Assert stderr contains `expected`.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}

/// Assert stdout does NOT contain `excluded`.
pub fn assert_stdout_excludes(output: &Output, excluded: &str) {
    let out = stdout(output);
    assert!(
        !out.contains(excluded),
        "stdout should not contain '{}', got: {}",
        excluded,
        out
    );
}
