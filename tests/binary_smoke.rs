use std::process::Command;
use tempfile::tempdir;

#[test]
fn binary_print_config_succeeds() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    let out = Command::new(assert_cmd::cargo::cargo_bin!("pkgfix"))
        .env("PKGFIX_CONFIG", &cfg)
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("PKGFIX_CONFIG"), "{stdout}");
}

#[test]
fn binary_without_command_fails() {
    let td = tempdir().unwrap();
    let out = Command::new(assert_cmd::cargo::cargo_bin!("pkgfix"))
        .env("PKGFIX_CONFIG", td.path().join("none.xml"))
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
}
