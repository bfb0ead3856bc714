use std::fs;

use asra_persistence::ingest::{ingest_files, IngestResult};

#[test]
fn duplicates_by_content_are_not_copied() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    fs::write(dst.path().join("existing.txt"), "same content").unwrap();
    fs::write(dst.path().join(".gitkeep"), "").unwrap();
    fs::write(src.path().join("copy.txt"), "same content").unwrap();
    fs::write(src.path().join("fresh.txt"), "new content").unwrap();
    fs::write(src.path().join("fresh_again.txt"), "new content").unwrap();

    let files = vec![src.path().join("copy.txt"),
                     src.path().join("fresh.txt"),
                     src.path().join("fresh_again.txt"),
                     src.path().join("missing.txt")];
    let results = ingest_files(&files, dst.path()).unwrap();

    assert_eq!(results[0],
               IngestResult::Saved { file: "copy.txt".into(), path: dst.path().join("existing.txt"), is_new: false });
    assert_eq!(results[1],
               IngestResult::Saved { file: "fresh.txt".into(), path: dst.path().join("fresh.txt"), is_new: true });
    assert!(results[2].is_duplicate());
    assert!(!results[3].is_success());
    assert!(!dst.path().join("copy.txt").exists());
    assert!(!dst.path().join("fresh_again.txt").exists());
}
