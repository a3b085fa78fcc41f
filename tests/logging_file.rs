//! --log-file style logging through the platform appender, scoped to the test.

use std::path::PathBuf;
use tempfile::tempdir;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry};

use pkgfix::platform::open_log_file_secure_append;
use pkgfix::{BomOptions, remove_boms};

#[test]
fn library_events_reach_the_log_file() {
    let td = tempdir().expect("tempdir");
    let base = std::fs::canonicalize(td.path()).unwrap();
    let log_path: PathBuf = base.join("logs").join("pkgfix.log");
    std::fs::write(base.join("A.java"), b"\xEF\xBB\xBFclass A {}").unwrap();

    let file = open_log_file_secure_append(&log_path).expect("open_log_file_secure_append");
    let (writer, guard): (tracing_appender::non_blocking::NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(file);
    let layer = tsfmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .compact();
    let dispatch = tracing::Dispatch::new(registry().with(EnvFilter::new("info")).with(layer));

    tracing::dispatcher::with_default(&dispatch, || {
        remove_boms(&BomOptions {
            root: base.clone(),
            extension: "java".into(),
            dry_run: false,
        })
        .unwrap();
    });
    drop(guard);

    let contents = std::fs::read_to_string(&log_path).expect("read log file");
    assert!(contents.contains("Removing BOM"), "contents={contents}");
    assert!(contents.contains("BOM scan finished"), "contents={contents}");
}
