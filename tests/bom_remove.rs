//! BOM remover over a real tree: stripped files, untouched files, counts.

use assert_fs::prelude::*;
use pkgfix::{BomOptions, remove_boms};

fn opts(root: &std::path::Path) -> BomOptions {
    BomOptions {
        root: root.to_path_buf(),
        extension: "java".into(),
        dry_run: false,
    }
}

#[test]
fn strips_marker_and_keeps_remaining_bytes() {
    let dir = assert_fs::TempDir::new().unwrap();
    let f = dir.child("src/main/java/App.java");
    f.write_binary(&[0xEF, 0xBB, 0xBF, 0x70, 0x75, 0x62, 0x6C, 0x69, 0x63]).unwrap();

    let report = remove_boms(&opts(dir.path())).unwrap();

    assert_eq!(report.fixed_count(), 1);
    assert_eq!(std::fs::read(f.path()).unwrap(), b"public");
}

#[test]
fn counts_one_per_file_with_marker_and_leaves_others_identical() {
    let dir = assert_fs::TempDir::new().unwrap();
    let a = dir.child("a/A.java");
    a.write_binary(b"\xEF\xBB\xBFclass A {}\n").unwrap();
    let b = dir.child("b/deep/B.java");
    b.write_binary(b"\xEF\xBB\xBFclass B {}\n").unwrap();
    let plain = dir.child("a/Plain.java");
    plain.write_binary(b"class Plain {}\r\n").unwrap();
    let short = dir.child("Short.java");
    short.write_binary(b"\xEF\xBB").unwrap();

    let report = remove_boms(&opts(dir.path())).unwrap();

    assert_eq!(report.scanned, 4);
    assert_eq!(report.fixed_count(), 2);
    assert!(report.failures.is_empty());
    a.assert("class A {}\n");
    b.assert("class B {}\n");
    assert_eq!(std::fs::read(plain.path()).unwrap(), b"class Plain {}\r\n");
    assert_eq!(std::fs::read(short.path()).unwrap(), b"\xEF\xBB");
}

#[test]
fn other_extensions_are_never_touched() {
    let dir = assert_fs::TempDir::new().unwrap();
    let props = dir.child("application.properties");
    props.write_binary(b"\xEF\xBB\xBFkey=value").unwrap();
    let kt = dir.child("Main.kt");
    kt.write_binary(b"\xEF\xBB\xBFfun main() {}").unwrap();

    let report = remove_boms(&opts(dir.path())).unwrap();

    assert_eq!(report.scanned, 0);
    assert_eq!(report.fixed_count(), 0);
    assert_eq!(std::fs::read(props.path()).unwrap(), b"\xEF\xBB\xBFkey=value");
    assert_eq!(std::fs::read(kt.path()).unwrap(), b"\xEF\xBB\xBFfun main() {}");
}

#[test]
fn second_run_fixes_nothing() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("One.java").write_binary(b"\xEF\xBB\xBFone").unwrap();
    dir.child("x/Two.java").write_binary(b"\xEF\xBB\xBFtwo").unwrap();

    let first = remove_boms(&opts(dir.path())).unwrap();
    let second = remove_boms(&opts(dir.path())).unwrap();

    assert_eq!(first.fixed_count(), 2);
    assert_eq!(second.fixed_count(), 0);
    assert_eq!(second.scanned, 2);
}

#[test]
fn custom_extension_is_honored() {
    let dir = assert_fs::TempDir::new().unwrap();
    let kt = dir.child("Main.kt");
    kt.write_binary(b"\xEF\xBB\xBFfun main() {}").unwrap();
    let java = dir.child("Main.java");
    java.write_binary(b"\xEF\xBB\xBFclass Main {}").unwrap();

    let report = remove_boms(&BomOptions {
        extension: "kt".into(),
        ..opts(dir.path())
    })
    .unwrap();

    assert_eq!(report.fixed, vec![kt.path().to_path_buf()]);
    kt.assert("fun main() {}");
    assert_eq!(std::fs::read(java.path()).unwrap(), b"\xEF\xBB\xBFclass Main {}");
}
