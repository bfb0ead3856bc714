use std::fs;

use asra_core::constants::{LITERATURE_ANALYSIS, VISUALIZATION_DIR};
use asra_core::errors::StoreError;
use asra_core::model::{artifact_fingerprint, ArtifactMap};
use asra_core::store::ArtifactStore;
use asra_persistence::{clear_all, DataLayout, FsArtifactStore};
use serde_json::json;

fn sample(pairs: &[(&str, serde_json::Value)]) -> ArtifactMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn absent_artifact_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path());
    assert_eq!(store.load(&LITERATURE_ANALYSIS), Err(StoreError::NotFound("literature_analysis.json".into())));
    assert!(!store.exists(&LITERATURE_ANALYSIS));
}

#[test]
fn non_object_content_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("literature_analysis.json"), "[\"a\", \"b\"]").unwrap();
    let store = FsArtifactStore::new(dir.path());
    assert!(matches!(store.load(&LITERATURE_ANALYSIS), Err(StoreError::Format { .. })));

    fs::write(dir.path().join("literature_analysis.json"), "{\"trunc").unwrap();
    assert!(matches!(store.load(&LITERATURE_ANALYSIS), Err(StoreError::Format { .. })));
}

#[test]
fn save_replaces_and_never_merges() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path().join("outputs"));
    store.save(&LITERATURE_ANALYSIS, &sample(&[("PaperA", json!(1)), ("PaperB", json!(2))])).unwrap();
    store.save(&LITERATURE_ANALYSIS, &sample(&[("PaperC", json!(3))])).unwrap();

    let loaded = store.load(&LITERATURE_ANALYSIS).unwrap();
    assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["PaperC"]);
}

#[test]
fn round_trip_keeps_order_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path());
    let map = sample(&[("zeta", json!({"ñ": "ü"})), ("alpha", json!([1, 2]))]);
    store.save(&LITERATURE_ANALYSIS, &map).unwrap();

    let loaded = store.load(&LITERATURE_ANALYSIS).unwrap();
    assert_eq!(loaded, map);
    assert_eq!(artifact_fingerprint(&loaded), artifact_fingerprint(&map));

    let raw = fs::read_to_string(store.path_of(&LITERATURE_ANALYSIS)).unwrap();
    assert!(raw.contains("\"ñ\": \"ü\""));
    assert!(raw.ends_with("}\n"));

    let names: Vec<String> = fs::read_dir(dir.path()).unwrap()
                                                     .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                                                     .collect();
    assert_eq!(names, vec!["literature_analysis.json".to_string()]);
}

#[test]
fn identical_saves_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path());
    let map = sample(&[("PaperA", json!({"key_insights": ["a"], "importance_scores": [0.5]}))]);
    store.save(&LITERATURE_ANALYSIS, &map).unwrap();
    let first = fs::read(store.path_of(&LITERATURE_ANALYSIS)).unwrap();
    store.save(&LITERATURE_ANALYSIS, &map).unwrap();
    assert_eq!(fs::read(store.path_of(&LITERATURE_ANALYSIS)).unwrap(), first);
}

#[test]
fn blobs_land_under_the_store_root() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path());
    let location = store.write_blob(&format!("{VISUALIZATION_DIR}/paper_a.svg"), b"<svg/>").unwrap();

    assert!(location.ends_with("paper_a.svg"));
    assert_eq!(fs::read(dir.path().join("visualizations/paper_a.svg")).unwrap(), b"<svg/>");
    assert!(store.write_blob("../escape.svg", b"x").is_err());
}

#[test]
fn clear_keeps_gitkeep_and_directories() {
    let dir = tempfile::tempdir().unwrap();
    let layout = DataLayout::new(dir.path());
    layout.prepare().unwrap();
    fs::write(layout.papers_dir.join(".gitkeep"), "").unwrap();
    fs::write(layout.papers_dir.join("paper.txt"), "text").unwrap();
    fs::write(layout.experimental_dir.join("data.csv"), "a,b\n1,2\n").unwrap();
    fs::create_dir_all(layout.outputs_dir.join("visualizations")).unwrap();
    fs::write(layout.outputs_dir.join("visualizations/x.svg"), "<svg/>").unwrap();
    fs::write(layout.outputs_dir.join("literature_analysis.json"), "{}").unwrap();

    let summary = clear_all(&layout).unwrap();

    assert_eq!(summary.files_removed, 3);
    assert_eq!(summary.dirs_removed, 1);
    assert!(layout.papers_dir.join(".gitkeep").exists());
    assert!(layout.outputs_dir.is_dir());
    assert_eq!(fs::read_dir(&layout.outputs_dir).unwrap().count(), 0);
}
