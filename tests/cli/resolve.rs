//! Tests for `caisson resolve` argument handling.
//!
//! Everything here fails during reference classification, before any
//! backend call, so the suite runs offline. Live resolution is covered
//! by the `live_aws` suite.

use crate::support::*;
use std::fs;

#[test]
fn test_resolve_requires_references() {
    let t = Test::new();

    let output = t.cmd().arg("resolve").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "--stack");
}

#[test]
fn test_resolve_rejects_malformed_stack_locator() {
    let t = Test::new();

    // arn: prefix with too few segments
    let output = t.resolve("arn:aws:cloudformation", SECRET_ARN);
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed reference");
    assert_stdout_contains(&output, "@path-to-a-file");
}

#[test]
fn test_resolve_rejects_malformed_secret_locator() {
    let t = Test::new();

    // The stack reference is fine; classification still fails on the secret
    let output = t.resolve(STACK_ARN, "arn:aws:secretsmanager");
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed reference");
}

#[test]
fn test_resolve_rejects_bare_name_with_whitespace() {
    let t = Test::new();

    let output = t.resolve("my stack", SECRET_ARN);
    assert_failure(&output);
    assert_stderr_contains(&output, "whitespace");
}

#[test]
fn test_resolve_rejects_empty_reference() {
    let t = Test::new();

    let output = t.resolve("", SECRET_ARN);
    assert_failure(&output);
    assert_stderr_contains(&output, "reference is empty");
}

#[test]
fn test_resolve_file_reference_missing_file() {
    let t = Test::new();

    let output = t.resolve("@/does/not/exist", SECRET_ARN);
    assert_failure(&output);
    assert_stderr_contains(&output, "not readable");
}

#[test]
fn test_resolve_file_reference_reads_contents() {
    let t = Test::new();

    // The file's contents go through the same classification as a flag value
    let path = t.dir.path().join("stack-ref");
    fs::write(&path, "arn:aws:cloudformation\n").unwrap();

    let output = t.resolve(&format!("@{}", path.display()), SECRET_ARN);
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed reference");
    assert_stderr_contains(&output, "arn:aws:cloudformation");
}

#[test]
fn test_resolve_file_reference_rejects_empty_file() {
    let t = Test::new();

    let path = t.dir.path().join("stack-ref");
    fs::write(&path, "").unwrap();

    let output = t.resolve(&format!("@{}", path.display()), SECRET_ARN);
    assert_failure(&output);
    assert_stderr_contains(&output, "referenced file is empty");
}

#[test]
fn test_resolve_file_reference_does_not_nest() {
    let t = Test::new();

    let path = t.dir.path().join("stack-ref");
    fs::write(&path, "@another-file").unwrap();

    let output = t.resolve(&format!("@{}", path.display()), SECRET_ARN);
    assert_failure(&output);
    assert_stderr_contains(&output, "do not nest");
}

#[test]
fn test_resolve_reads_references_from_environment() {
    let t = Test::new();

    // No flags; both references arrive via the environment
    let output = t
        .cmd()
        .env("CAISSON_STACK", "not a stack")
        .env("CAISSON_SECRET", SECRET_ARN)
        .arg("resolve")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed reference");
    assert_stderr_contains(&output, "not a stack");
}

#[test]
fn test_resolve_json_failure_emits_no_partial_document() {
    let t = Test::new();

    let output = t.resolve_json("arn:aws:cloudformation", SECRET_ARN);
    assert_failure(&output);
    assert_stdout_excludes(&output, "{");
}
