//! --json switches the tracing output to one JSON object per line.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn json_log_lines_carry_path_field() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let file = base.join("A.java");
    fs::write(&file, b"\xEF\xBB\xBFclass A {}").unwrap();

    let out = Command::new(assert_cmd::cargo::cargo_bin!("pkgfix"))
        .env("PKGFIX_CONFIG", base.join("none.xml"))
        .args(["--json", "strip-bom"])
        .arg(&base)
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(|l| serde_json::from_str(l).expect("valid JSON log line"))
        .collect();

    let expected = format!("Removing BOM from: {}", file.display());
    let removal = events
        .iter()
        .find(|e| e["fields"]["message"] == expected.as_str())
        .expect("a 'Removing BOM from' event");
    assert_eq!(removal["level"], "INFO");
    assert_eq!(removal["fields"]["path"], file.display().to_string());
}
