use std::fs;

use asra_core::constants::{VISUALIZATION_DIR, VISUALIZATION_METADATA};
use asra_core::model::ArtifactMap;
use asra_core::store::ArtifactStore;
use asra_persistence::{clear_all, prune_stale_blobs, DataLayout, FsArtifactStore};
use serde_json::json;

#[test]
fn prune_drops_images_no_longer_referenced() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path());
    let current = store.write_blob(&format!("{VISUALIZATION_DIR}/current_1234abcd.svg"), b"<svg/>").unwrap();
    store.write_blob(&format!("{VISUALIZATION_DIR}/stale_deadbeef.svg"), b"<svg/>").unwrap();
    let mut metadata = ArtifactMap::new();
    metadata.insert("PaperA".into(), json!(current));
    store.save(&VISUALIZATION_METADATA, &metadata).unwrap();

    assert_eq!(prune_stale_blobs(&store).unwrap(), 1);

    let images = dir.path().join(VISUALIZATION_DIR);
    assert!(images.join("current_1234abcd.svg").is_file());
    assert!(!images.join("stale_deadbeef.svg").exists());
    assert_eq!(prune_stale_blobs(&store).unwrap(), 0);
}

#[test]
fn prune_without_metadata_keeps_everything() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path());
    store.write_blob(&format!("{VISUALIZATION_DIR}/orphan_00000000.svg"), b"<svg/>").unwrap();

    assert_eq!(prune_stale_blobs(&store).unwrap(), 0);
    assert!(dir.path().join(VISUALIZATION_DIR).join("orphan_00000000.svg").is_file());
}

#[test]
fn clear_keeps_gitkeep_and_directories() {
    let dir = tempfile::tempdir().unwrap();
    let layout = DataLayout::new(dir.path());
    layout.prepare().unwrap();
    fs::write(layout.papers_dir.join(".gitkeep"), "").unwrap();
    fs::write(layout.papers_dir.join("p.txt"), "text").unwrap();
    fs::create_dir_all(layout.outputs_dir.join(VISUALIZATION_DIR)).unwrap();

    let summary = clear_all(&layout).unwrap();

    assert_eq!(summary.files_removed, 1);
    assert_eq!(summary.dirs_removed, 1);
    assert!(layout.papers_dir.join(".gitkeep").exists());
    assert!(layout.outputs_dir.is_dir());
}
