#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/library.json")
}

fn exe() -> &'static str {
    env!("CARGO_BIN_EXE_nextapi-gen")
}

#[test]
fn test_cli_generate_writes_routes() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("app/api");
    let output = Command::new(exe())
        .arg("generate")
        .arg("--dmmf")
        .arg(fixture())
        .arg("--output")
        .arg(&out)
        .args(["--set", "extension=js"])
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{output:?}");
    assert!(out.join("user/route.js").is_file());
    assert!(out.join("user/[id]/route.js").is_file());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 18 file(s) for 5 model(s)"));
}

#[test]
fn test_cli_generate_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nextapi.toml");
    std::fs::write(&config, "docs = false\napiPrefix = \"/v1\"\n").unwrap();
    let out = dir.path().join("api");
    let status = Command::new(exe())
        .arg("generate")
        .arg("--dmmf")
        .arg(fixture())
        .arg("--output")
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .status()
        .expect("run cli");
    assert!(status.success());
    assert!(out.join("book/route.ts").is_file());
    assert!(!out.join("docs.html").exists());
    assert!(!out.join("book/postman-collection.json").exists());
}

#[test]
fn test_cli_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("api");
    let output = Command::new(exe())
        .arg("generate")
        .arg("--dmmf")
        .arg(fixture())
        .arg("--output")
        .arg(&out)
        .arg("--dry-run")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert!(!out.exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would write 18 file(s):"));
    assert!(stdout.contains("postman-collection.json"));
}

#[test]
fn test_cli_rejects_bad_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(exe())
        .arg("generate")
        .arg("--dmmf")
        .arg(fixture())
        .arg("--output")
        .arg(dir.path())
        .args(["--set", "extension=py"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("generator config key 'extension'"));
}

#[test]
fn test_cli_lint_and_inspect() {
    let lint = Command::new(exe())
        .args(["lint", "--fail-on-error", "--dmmf"])
        .arg(fixture())
        .output()
        .expect("run lint");
    assert!(lint.status.success());
    assert!(String::from_utf8_lossy(&lint.stdout).contains("No lint issues found"));

    let inspect = Command::new(exe())
        .args(["inspect", "--dmmf"])
        .arg(fixture())
        .output()
        .expect("run inspect");
    assert!(inspect.status.success());
    let stdout = String::from_utf8_lossy(&inspect.stdout);
    assert!(stdout.contains("User → /api/user"));
    assert!(stdout.contains("avatar → public/useravatars/"));
    assert!(stdout.contains("relations: borrowings, reservations"));
}

#[test]
fn test_cli_lint_fails_on_errors() {
    let dir = tempfile::tempdir().unwrap();
    let dmmf = dir.path().join("dmmf.yaml");
    std::fs::write(
        &dmmf,
        "models:\n  - name: Tag\n    fields:\n      - name: label\n        kind: scalar\n        type: String\n",
    )
    .unwrap();
    let output = Command::new(exe())
        .args(["lint", "--fail-on-error", "--dmmf"])
        .arg(&dmmf)
        .output()
        .expect("run lint");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("missing_int_id"));
}

#[test]
fn test_protocol_mode_manifest() {
    let mut child = Command::new(exe())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn generator");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"{\"jsonrpc\":\"2.0\",\"method\":\"getManifest\",\"params\":{},\"id\":1}\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let reply: Value = stderr
        .lines()
        .find_map(|line| serde_json::from_str(line).ok())
        .expect("a JSON-RPC reply on stderr");
    assert_eq!(reply["id"], 1);
    assert_eq!(reply["result"]["manifest"]["defaultOutput"], "../api");
}
