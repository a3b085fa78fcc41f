use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn run(args: &[&str], project: &std::path::Path, cfg: &std::path::Path) -> std::process::Output {
    Command::new(assert_cmd::cargo::cargo_bin!("pkgfix"))
        .env("PKGFIX_CONFIG", cfg)
        .arg("rename-namespace")
        .arg(project)
        .args(args)
        .output()
        .expect("spawn binary")
}

#[test]
fn renames_project_and_is_safe_to_rerun() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let project = base.join("backend");
    let main = project.join("src/main/java/com/applytrack");
    let test = project.join("src/test/java/com/applytrack");
    fs::create_dir_all(&main).unwrap();
    fs::create_dir_all(&test).unwrap();
    fs::write(main.join("App.java"), "package com.applytrack;\nimport com.applytrack.model.User;\n").unwrap();
    fs::write(test.join("AppTest.java"), "package com.applytrack;\n").unwrap();
    let cfg = base.join("none.xml");

    let out = run(&[], &project, &cfg);
    let stdout = String::from_utf8_lossy(&out.stdout);
    eprintln!("=== STDOUT ===\n{stdout}");
    assert!(out.status.success());
    assert!(stdout.contains("Updated 2 java files."), "{stdout}");
    let progress = format!(
        "Updating references in: {}",
        project.join("src/main/java/com/applyfollow/App.java").display()
    );
    assert!(stdout.contains(&progress), "{stdout}");

    let app = project.join("src/main/java/com/applyfollow/App.java");
    assert_eq!(
        fs::read_to_string(&app).unwrap(),
        "package com.applyfollow;\nimport com.applyfollow.model.User;\n"
    );
    assert!(project.join("src/test/java/com/applyfollow/AppTest.java").exists());

    let again = run(&[], &project, &cfg);
    let stdout = String::from_utf8_lossy(&again.stdout);
    assert!(again.status.success());
    assert!(stdout.contains("not found (maybe already renamed?)"), "{stdout}");
    assert!(stdout.contains("Updated 0 java files."), "{stdout}");
}

#[test]
fn explicit_namespace_pair() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let project = base.join("svc");
    let pkg = project.join("src/main/java/org/acme/legacy");
    fs::create_dir_all(&pkg).unwrap();
    fs::write(pkg.join("A.java"), "package org.acme.legacy;\n").unwrap();

    let out = run(&["--from", "org.acme.legacy", "--to", "org.acme.core"], &project, &base.join("none.xml"));

    assert!(out.status.success());
    assert_eq!(
        fs::read_to_string(project.join("src/main/java/org/acme/core/A.java")).unwrap(),
        "package org.acme.core;\n"
    );
}

#[test]
fn invalid_namespace_fails_before_touching_files() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let project = base.join("svc");
    let pkg = project.join("src/main/java/com/applytrack");
    fs::create_dir_all(&pkg).unwrap();

    let out = run(&["--to", "com.apply-follow"], &project, &base.join("none.xml"));

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid namespace"));
    assert!(pkg.exists());
}
