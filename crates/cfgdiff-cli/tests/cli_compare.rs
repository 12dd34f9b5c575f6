//! CLI integration tests.
//!
//! Runs the `cfgdiff` binary as a subprocess against fixture files in a
//! temporary directory and checks exit codes, stdout, and stderr logs.

use std::path::{Path, PathBuf};
use std::process::Command;

struct Run {
    code: i32,
    stdout: String,
    stderr: String,
}

fn cfgdiff(args: &[&str]) -> Run {
    let output = Command::new(env!("CARGO_BIN_EXE_cfgdiff"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to spawn cfgdiff: {e}"));
    Run {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn s(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Comparison results
// ============================================================================

#[test]
fn cli_reordered_keys_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(dir.path(), "a.yaml", "a: 1\nb: 2\n");
    let b = fixture(dir.path(), "b.yaml", "b: 2\na: 1\n");

    let run = cfgdiff(&[s(&a), s(&b)]);
    assert_eq!(run.code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.is_empty(), "unexpected diff: {}", run.stdout);
    assert!(run.stderr.contains("configurations are identical"));
}

#[test]
fn cli_changed_value_printed_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(dir.path(), "a.yaml", "a: 1\n");
    let b = fixture(dir.path(), "b.yaml", "a: 2\n");

    let run = cfgdiff(&[s(&a), s(&b)]);
    assert_eq!(run.code, 0, "stderr: {}", run.stderr);

    let lines: Vec<&str> = run.stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("--- {}", a.display()).as_str(),
            format!("+++ {}", b.display()).as_str(),
            "@@ -1,3 +1,3 @@",
            " {",
            "-    \"a\": 1",
            "+    \"a\": 2",
            " }",
        ]
    );
}

#[test]
fn cli_nested_yaml_diff() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(
        dir.path(),
        "a.yaml",
        "server:\n  port: 80\n  hosts: [a, b]\nlogging: {level: info}\n",
    );
    let b = fixture(
        dir.path(),
        "b.yaml",
        "logging:\n  level: debug\nserver:\n  hosts: [a, b]\n  port: 80\n",
    );

    let run = cfgdiff(&[s(&a), s(&b)]);
    assert_eq!(run.code, 0, "stderr: {}", run.stderr);
    let removed: Vec<&str> = run.stdout.lines().filter(|l| l.starts_with("-    ")).collect();
    let added: Vec<&str> = run.stdout.lines().filter(|l| l.starts_with("+    ")).collect();
    assert_eq!(removed, vec!["-        \"level\": \"info\""]);
    assert_eq!(added, vec!["+        \"level\": \"debug\""]);
}

#[test]
fn cli_yaml_merge_key_matches_inlined_keys() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(
        dir.path(),
        "a.yaml",
        "defaults: &defaults\n  timeout: 30\n  retries: 3\nservice:\n  <<: *defaults\n  retries: 5\n",
    );
    let b = fixture(
        dir.path(),
        "b.yaml",
        "defaults:\n  timeout: 30\n  retries: 3\nservice:\n  timeout: 30\n  retries: 5\n",
    );

    let run = cfgdiff(&[s(&a), s(&b)]);
    assert_eq!(run.code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.is_empty(), "unexpected diff: {}", run.stdout);
    assert!(run.stderr.contains("configurations are identical"));
}

#[test]
fn cli_json_type() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(dir.path(), "a.json", r#"{"replicas": 2, "image": "app:1"}"#);
    let b = fixture(dir.path(), "b.json", r#"{"image": "app:2", "replicas": 2}"#);

    let run = cfgdiff(&[s(&a), s(&b), "--type", "json"]);
    assert_eq!(run.code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("-    \"image\": \"app:1\","));
    assert!(run.stdout.contains("+    \"image\": \"app:2\","));
}

#[test]
fn cli_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(dir.path(), "a.yaml", "a: 1\nb: [1, 2]\n");
    let b = fixture(dir.path(), "b.yaml", "a: 1\nb: [1, 3]\n");
    let out = dir.path().join("out.diff");

    let run = cfgdiff(&[s(&a), s(&b), "--output", s(&out)]);
    assert_eq!(run.code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.is_empty());
    assert!(run.stderr.contains("diff written to"));

    let written = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert!(lines[0].starts_with("--- "));
    assert!(lines[1].starts_with("+++ "));
    assert!(lines.iter().any(|l| l.starts_with("@@ -")));
    assert!(written.ends_with('\n'));
}

#[test]
fn cli_output_write_failure_keeps_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(dir.path(), "a.yaml", "a: 1\n");
    let b = fixture(dir.path(), "b.yaml", "a: 2\n");
    let out = dir.path().join("missing").join("out.diff");

    let run = cfgdiff(&[s(&a), s(&b), "-o", s(&out)]);
    assert_eq!(run.code, 0);
    assert!(run.stderr.contains("error writing diff"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn cli_missing_first_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    let b = fixture(dir.path(), "b.yaml", "a: 1\n");

    let run = cfgdiff(&[s(&missing), s(&b)]);
    assert_eq!(run.code, 1);
    assert!(run.stderr.contains(s(&missing)), "stderr: {}", run.stderr);
    assert!(run.stdout.is_empty());
}

#[test]
fn cli_missing_second_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(dir.path(), "a.yaml", "a: 1\n");
    let missing = dir.path().join("absent.yaml");

    let run = cfgdiff(&[s(&a), s(&missing)]);
    assert_eq!(run.code, 1);
    assert!(run.stderr.contains("file not found"));
}

#[test]
fn cli_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(dir.path(), "a.json", "{\"a\": 1,\n\"b\": }\n");
    let b = fixture(dir.path(), "b.json", "{\"a\": 1}");

    let run = cfgdiff(&[s(&a), s(&b), "--type", "json"]);
    assert_eq!(run.code, 1);
    assert!(run.stderr.contains("invalid JSON file"), "stderr: {}", run.stderr);
    assert!(run.stderr.contains("line 2"), "stderr: {}", run.stderr);
    assert!(run.stdout.is_empty());
}

#[test]
fn cli_ini_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(dir.path(), "a.ini", "[s]\nk = v\n");
    let b = fixture(dir.path(), "b.ini", "[s]\nk = w\n");

    let run = cfgdiff(&[s(&a), s(&b), "--type", "ini"]);
    assert_eq!(run.code, 1);
    assert!(run.stderr.contains("INI format is not yet supported"));
}

#[test]
fn cli_schema_required_field_missing() {
    let dir = tempfile::tempdir().unwrap();
    let schema = fixture(
        dir.path(),
        "schema.json",
        r#"{"type": "object", "required": ["service_name"], "properties": {"service_name": {"type": "string"}}}"#,
    );
    let a = fixture(dir.path(), "a.yaml", "port: 80\n");
    let b = fixture(dir.path(), "b.yaml", "service_name: api\nport: 80\n");

    let run = cfgdiff(&[s(&a), s(&b), "--schema", s(&schema)]);
    assert_eq!(run.code, 1);
    assert!(run.stderr.contains("service_name"), "stderr: {}", run.stderr);
    assert!(run.stdout.is_empty());
}

#[test]
fn cli_schema_passes() {
    let dir = tempfile::tempdir().unwrap();
    let schema = fixture(
        dir.path(),
        "schema.json",
        r#"{"type": "object", "required": ["port"]}"#,
    );
    let a = fixture(dir.path(), "a.yaml", "port: 80\n");
    let b = fixture(dir.path(), "b.yaml", "port: 81\n");

    let run = cfgdiff(&[s(&a), s(&b), "--schema", s(&schema)]);
    assert_eq!(run.code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("+    \"port\": 81"));
}

#[test]
fn cli_schema_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(dir.path(), "a.yaml", "port: 80\n");
    let b = fixture(dir.path(), "b.yaml", "port: 81\n");
    let schema = dir.path().join("nope.json");

    let run = cfgdiff(&[s(&a), s(&b), "--schema", s(&schema)]);
    assert_eq!(run.code, 1);
    assert!(run.stderr.contains("schema file not found"));
}

#[test]
fn cli_quiet_suppresses_info() {
    let dir = tempfile::tempdir().unwrap();
    let a = fixture(dir.path(), "a.yaml", "a: 1\n");
    let b = fixture(dir.path(), "b.yaml", "a: 1\n");

    let run = cfgdiff(&[s(&a), s(&b), "--quiet"]);
    assert_eq!(run.code, 0);
    assert!(run.stderr.is_empty(), "stderr: {}", run.stderr);
}
