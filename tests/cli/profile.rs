//! Tests for `caisson profile create/show/validate/list`.

use crate::support::*;
use std::fs;

/// Write a profile document straight to the store, bypassing the CLI.
///
/// Lets tests stage documents the CLI would refuse to write (hand-edited,
/// malformed, or pointing at missing parents).
fn write_raw_profile(t: &Test, name: &str, json: &str) {
    let dir = t.profile_dir(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("profile.json"), json).unwrap();
}

// Creation

#[test]
fn test_create_profile() {
    let t = Test::new();

    let output = t.profile_create("dev", VALID_PROFILE_SETS);
    assert_success(&output);
    assert_stdout_contains(&output, "created profile 'dev'");
    assert_stdout_contains(&output, "profile.json");
}

#[test]
fn test_create_writes_profile_file() {
    let t = Test::with_profile("dev");

    let path = t.profile_dir("dev").join("profile.json");
    assert!(path.exists(), "profile.json should exist after create");

    let contents = fs::read_to_string(path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["authentication"]["tenant"], "acme");
    assert_eq!(parsed["_metadata"]["schema_version"], 1);
}

#[test]
fn test_create_duplicate_fails() {
    let t = Test::with_profile("dev");

    let output = t.profile_create("dev", VALID_PROFILE_SETS);
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
    assert_stdout_contains(&output, "caisson profile show dev");
}

#[test]
fn test_create_invalid_names_rejected() {
    let t = Test::new();

    // Names become directory names, so anything outside the safe set fails
    for name in ["Dev", "dev/../../etc", "has space", "sn@ke"] {
        let output = t.profile_create(name, VALID_PROFILE_SETS);
        assert_failure(&output);
        assert_stderr_contains(&output, "invalid profile name");
    }
}

#[test]
fn test_create_requires_path_value_syntax() {
    let t = Test::new();

    let output = t.profile_create("dev", &["infrastructure.stack"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "expected PATH=VALUE");
}

#[test]
fn test_create_unknown_field_fails() {
    let t = Test::new();

    let output = t.profile_create("dev", &["infrastructure.flavor=vanilla"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "unknown profile field");
}

#[test]
fn test_create_bad_numeric_value_fails() {
    let t = Test::new();

    let mut sets = VALID_PROFILE_SETS.to_vec();
    sets.push("deployment.memory_mb=lots");
    let output = t.profile_create("dev", &sets);
    assert_failure(&output);
    assert_stderr_contains(&output, "deployment.memory_mb");
}

#[test]
fn test_create_bad_boolean_value_fails() {
    let t = Test::new();

    let mut sets = VALID_PROFILE_SETS.to_vec();
    sets.push("security.enable_webhook_verification=yes");
    let output = t.profile_create("dev", &sets);
    assert_failure(&output);
    assert_stderr_contains(&output, "enable_webhook_verification");
}

#[test]
fn test_create_reports_every_missing_field() {
    let t = Test::new();

    // Only one of six required fields is set; all five gaps must be named
    let output = t.profile_create("dev", &["authentication.tenant=acme"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed validation");
    assert_stderr_contains(&output, "'infrastructure.stack' must not be empty");
    assert_stderr_contains(&output, "'infrastructure.catalog' must not be empty");
    assert_stderr_contains(&output, "'storage.bucket' must not be empty");
    assert_stderr_contains(&output, "'security.secret' must not be empty");
}

#[test]
fn test_create_rejects_wrong_service_locator() {
    let t = Test::new();

    let mut sets = vec![
        "infrastructure.catalog=catalog_dev",
        "storage.bucket=acme-user-data",
        "authentication.tenant=acme",
        "authentication.client_id=cid-123",
        "security.secret=svc/dev/config",
    ];
    sets.push("infrastructure.stack=arn:aws:s3:::not-a-stack");
    let output = t.profile_create("dev", &sets);
    assert_failure(&output);
    assert_stderr_contains(&output, "does not look like a cloudformation arn");
}

#[test]
fn test_create_accepts_full_locators() {
    let t = Test::new();

    let stack_set = format!("infrastructure.stack={STACK_ARN}");
    let secret_set = format!("security.secret={SECRET_ARN}");
    let queue_set = format!("infrastructure.queue={QUEUE_ARN}");
    let sets = [
        stack_set.as_str(),
        "infrastructure.catalog=catalog_dev",
        queue_set.as_str(),
        "storage.bucket=acme-user-data",
        "authentication.tenant=acme",
        "authentication.client_id=cid-123",
        secret_set.as_str(),
    ];
    let output = t.profile_create("dev", &sets);
    assert_success(&output);
}

#[test]
fn test_create_rejects_bad_log_level() {
    let t = Test::new();

    let mut sets = VALID_PROFILE_SETS.to_vec();
    sets.push("logging.level=TRACE");
    let output = t.profile_create("dev", &sets);
    assert_failure(&output);
    assert_stderr_contains(&output, "expected one of");
}

#[test]
fn test_create_with_missing_parent_fails() {
    let t = Test::new();

    let output = t.profile_create_inheriting("dev", "ghost", &["logging.level=DEBUG"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "profile 'ghost' not found");
}

#[test]
fn test_create_sparse_child_validates_against_parent() {
    let t = Test::with_profile("base");

    // The child sets nothing required; the parent satisfies validation
    let output = t.profile_create_inheriting("dev", "base", &["logging.level=DEBUG"]);
    assert_success(&output);
}

// Show

#[test]
fn test_show_displays_fields() {
    let t = Test::with_profile("dev");

    let output = t.profile_show("dev");
    assert_success(&output);
    assert_stdout_contains(&output, "Profile dev");
    assert_stdout_contains(&output, "acme");
    assert_stdout_contains(&output, "(unset)");
}

#[test]
fn test_show_json_parses() {
    let t = Test::with_profile("dev");

    let output = t.profile_show_json("dev");
    assert_success(&output);

    let parsed = stdout_json(&output);
    assert_eq!(parsed["authentication"]["tenant"], "acme");
    assert_eq!(parsed["infrastructure"]["stack"], "svc-dev");
    assert_eq!(parsed["_metadata"]["schema_version"], 1);
    assert!(parsed["_metadata"]["created_by"].is_string());
}

#[test]
fn test_show_missing_profile_fails() {
    let t = Test::new();

    let output = t.profile_show("ghost");
    assert_failure(&output);
    assert_stderr_contains(&output, "profile 'ghost' not found");
    assert_stdout_contains(&output, "caisson profile create ghost");
}

#[test]
fn test_show_sparse_child_raw_then_effective() {
    let t = Test::with_inheriting_profiles("base", "dev", &["logging.level=DEBUG"]);

    // Raw view keeps the child sparse
    let output = t.profile_show("dev");
    assert_success(&output);
    assert_stdout_contains(&output, "inherits");
    assert_stdout_contains(&output, "(unset)");
    assert_stdout_excludes(&output, "svc-dev");

    // Effective view fills the gaps from the parent
    let output = t.profile_show_effective("dev");
    assert_success(&output);
    assert_stdout_contains(&output, "svc-dev");
    assert_stdout_contains(&output, "DEBUG");
}

#[test]
fn test_show_json_omits_unset_fields() {
    let t = Test::with_inheriting_profiles("base", "dev", &["logging.level=DEBUG"]);

    let output = t.profile_show_json("dev");
    assert_success(&output);

    let parsed = stdout_json(&output);
    assert_eq!(parsed["inherits"], "base");
    assert_eq!(parsed["logging"]["level"], "DEBUG");
    assert!(
        parsed["infrastructure"].get("stack").is_none(),
        "sparse child should not serialize inherited fields"
    );
}

// Validate

#[test]
fn test_validate_valid_profile() {
    let t = Test::with_profile("dev");

    let output = t.profile_validate("dev");
    assert_success(&output);
    assert_stdout_contains(&output, "profile 'dev' is valid");
}

#[test]
fn test_validate_child_uses_effective_document() {
    let t = Test::with_inheriting_profiles("base", "dev", &["logging.level=DEBUG"]);

    let output = t.profile_validate("dev");
    assert_success(&output);
}

#[test]
fn test_validate_reports_violations_in_hand_edited_profile() {
    let t = Test::new();
    write_raw_profile(&t, "broken", r#"{"authentication": {"tenant": "acme"}}"#);

    let output = t.profile_validate("broken");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed validation");
    assert_stderr_contains(&output, "'infrastructure.stack' must not be empty");
    assert_stderr_contains(&output, "'storage.bucket' must not be empty");
}

#[test]
fn test_validate_missing_parent_fails() {
    let t = Test::new();
    write_raw_profile(&t, "orphan", r#"{"inherits": "ghost"}"#);

    let output = t.profile_validate("orphan");
    assert_failure(&output);
    assert_stderr_contains(&output, "profile 'ghost' not found");
}

#[test]
fn test_validate_self_inheritance_fails() {
    let t = Test::new();
    write_raw_profile(&t, "loop", r#"{"inherits": "loop"}"#);

    let output = t.profile_validate("loop");
    assert_failure(&output);
    assert_stderr_contains(&output, "inherits from itself");
}

#[test]
fn test_validate_malformed_json_fails() {
    let t = Test::new();
    write_raw_profile(&t, "mangled", "{ this is not json");

    let output = t.profile_validate("mangled");
    assert_failure(&output);
    assert_stderr_contains(&output, "not valid json");
}

// List

#[test]
fn test_list_empty() {
    let t = Test::new();

    let output = t.profile_list();
    assert_success(&output);
    assert_stdout_contains(&output, "no profiles yet");
    assert_stdout_contains(&output, "caisson profile create");
}

#[test]
fn test_list_shows_profiles_sorted() {
    let t = Test::with_profile("staging");
    let output = t.profile_create("dev", VALID_PROFILE_SETS);
    assert_success(&output);

    let output = t.profile_list();
    assert_success(&output);
    let out = stdout(&output);
    let dev = out.find("dev").unwrap();
    let staging = out.find("staging").unwrap();
    assert!(dev < staging, "profiles should list alphabetically");
}

#[test]
fn test_list_json() {
    let t = Test::with_profile("dev");

    let output = t.profile_list_json();
    assert_success(&output);

    let parsed = stdout_json(&output);
    assert_eq!(parsed["count"], 1);
    assert_eq!(parsed["profiles"][0], "dev");
}

#[test]
fn test_list_ignores_directories_without_documents() {
    let t = Test::with_profile("dev");
    fs::create_dir_all(t.profile_dir("scratch")).unwrap();

    let output = t.profile_list_json();
    assert_success(&output);
    assert_eq!(stdout_json(&output)["count"], 1);
}
