//! Runs the `keymatch` binary against files on disk.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const PHONES: &str = r#"{
    "iphone": {"mfr": "Apple", "cost": 100000},
    "x2": {"mfr": "Motorola", "cost": 120000},
    "x100": {"mfr": "Motorola", "cost": 150000}
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.display().to_string()
}

fn keymatch(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_keymatch"))
        .args(args)
        .env_remove("KEYMATCH_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // The process may exit before reading stdin, so a broken pipe is fine
    let mut pipe = child.stdin.take().unwrap();
    let _ = pipe.write_all(stdin.unwrap_or_default().as_bytes());
    drop(pipe);

    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "keymatch failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn keys_from_named_collection_file() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "phones.json", PHONES);

    let output = keymatch(
        &["--data", &data, "--keys-only", "--where", r#"{"mfr": "Motorola"}"#],
        None,
    );
    let keys: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(keys, serde_json::json!(["x2", "x100"]));
}

#[test]
fn conditions_from_file_and_data_from_stdin() {
    let dir = TempDir::new().unwrap();
    let conditions = write(
        &dir,
        "conditions.json",
        r#"[["equals", "mfr", "Apple"], ["greater-than", "cost", 140000]]"#,
    );

    let output = keymatch(
        &["--conditions", &conditions, "--mode", "or", "--keep-keys"],
        Some(PHONES),
    );
    let records: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let keys: Vec<&str> = records
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["iphone", "x100"]);
}

#[test]
fn csv_output() {
    let output = keymatch(
        &["--where", r#"[["in", "mfr", ["Apple", "Samsung"]]]"#, "-o", "csv"],
        Some(PHONES),
    );
    assert_eq!(stdout(&output), "mfr,cost\nApple,100000\n");
}

#[test]
fn yaml_output() {
    let output = keymatch(
        &["--where", r#"{"cost": 150000}"#, "--output", "yaml", "--keys-only"],
        Some(PHONES),
    );
    assert_eq!(stdout(&output), "- x100\n");
}

#[test]
fn missing_data_file_fails_with_context() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(!Path::new(&missing).exists());

    let output = keymatch(
        &["--data", &missing.display().to_string(), "--where", "{}"],
        None,
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read collection"), "{stderr}");
}

#[test]
fn bad_pattern_fails() {
    let output = keymatch(&["--where", r#"[["preg", "mfr", "(("]]"#], Some(PHONES));
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid pattern"), "{stderr}");
}

#[test]
fn verbose_logs_to_stderr_only() {
    let output = keymatch(&["-v", "--keys-only", "--where", "{}"], Some(PHONES));
    let keys: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(keys, serde_json::json!(["iphone", "x2", "x100"]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("match run complete"));
}
