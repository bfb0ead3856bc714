use std::fs;
use std::path::Path;

use asra_adapters::ToolkitSettings;
use asra_core::constants::ALL_ARTIFACTS;
use asra_core::stage::StageState;
use asra_core::CancellationToken;
use asra_persistence::{ArtifactState, DataLayout, InputKind};
use asra_rust::app;
use asra_rust::AppConfig;

fn config(root: &Path, workers: usize) -> AppConfig {
    AppConfig { layout: DataLayout::new(root),
                workers,
                toolkit: ToolkitSettings { summarizer_model: "local-frequency".into(),
                                           hypothesis_model: "local-template".into(),
                                           visualization_model: "local-svg".into(),
                                           top_k: 3 } }
}

fn seed_inputs(cfg: &AppConfig) {
    cfg.layout.prepare().unwrap();
    fs::write(cfg.layout.papers_dir.join("PaperA.txt"),
              "Lattice strain increases graphene conductivity. Graphene samples under strain show higher \
               conductivity. Strain engineering is a practical lever.")
        .unwrap();
    fs::write(cfg.layout.papers_dir.join("PaperB.txt"),
              "Doping alters carrier density in graphene. Carrier density controls conductivity in doped samples.")
        .unwrap();
    fs::write(cfg.layout.experimental_dir.join("strain_run.csv"),
              "strain,temperature,conductivity\n0.1,300,1.2\n0.2,301,1.9\n0.3,299,3.1\n0.4,300,3.8\n")
        .unwrap();
}

fn input_count(cfg: &AppConfig, kind: InputKind) -> usize {
    app::list(cfg).unwrap().into_iter().find(|(k, _)| *k == kind).map(|(_, files)| files.len()).unwrap()
}

fn artifact_bytes(cfg: &AppConfig) -> Vec<Vec<u8>> {
    ALL_ARTIFACTS.iter().map(|n| fs::read(cfg.layout.outputs_dir.join(n.as_str())).unwrap()).collect()
}

#[test]
fn full_run_writes_every_artifact_and_a_report() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), 1);
    seed_inputs(&cfg);

    let out = app::run_pipeline(&cfg, None, CancellationToken::new()).unwrap();

    assert!(out.report.is_clean(), "{}", out.report);
    assert!(out.report_path.starts_with(cfg.layout.run_reports_dir()));
    assert!(out.report_path.is_file());
    for status in app::status(&cfg) {
        assert!(matches!(status.state, ArtifactState::Present { entries } if entries > 0), "{status:?}");
    }
    let images: Vec<_> = fs::read_dir(cfg.layout.outputs_dir.join("visualizations")).unwrap().collect();
    assert_eq!(images.len(), 2);
}

#[test]
fn rerun_with_same_inputs_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), 1);
    seed_inputs(&cfg);

    app::run_pipeline(&cfg, None, CancellationToken::new()).unwrap();
    let first = artifact_bytes(&cfg);
    let parallel = config(dir.path(), 3);
    app::run_pipeline(&parallel, None, CancellationToken::new()).unwrap();

    assert_eq!(artifact_bytes(&cfg), first);
}

#[test]
fn single_stage_rerun_and_unknown_stage() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), 1);
    seed_inputs(&cfg);
    app::run_pipeline(&cfg, None, CancellationToken::new()).unwrap();

    let out = app::run_pipeline(&cfg, Some("visualization"), CancellationToken::new()).unwrap();
    assert_eq!(out.report.stages.len(), 1);
    assert_eq!(out.report.stages[0].state, StageState::Completed);

    assert!(app::run_pipeline(&cfg, Some("nope"), CancellationToken::new()).is_err());
}

#[test]
fn missing_inputs_skip_stages_without_failing_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), 1);

    let out = app::run_pipeline(&cfg, None, CancellationToken::new()).unwrap();

    assert_eq!(out.report.stages.len(), 4);
    assert!(out.report.stages.iter().all(|s| matches!(s.state, StageState::Skipped(_))));
    assert!(app::status(&cfg).iter().all(|s| s.state == ArtifactState::Missing));
}

#[test]
fn cancelled_run_keeps_previous_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), 1);
    seed_inputs(&cfg);
    app::run_pipeline(&cfg, None, CancellationToken::new()).unwrap();
    let before = artifact_bytes(&cfg);

    let token = CancellationToken::new();
    token.cancel();
    let out = app::run_pipeline(&cfg, None, token).unwrap();

    assert!(out.report.stages.iter().all(|s| s.state == StageState::Skipped(asra_core::SkipReason::Cancelled)));
    assert_eq!(artifact_bytes(&cfg), before);
}

#[test]
fn ingest_then_clear() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir.path().join("data"), 1);
    let incoming = dir.path().join("incoming");
    fs::create_dir_all(&incoming).unwrap();
    fs::write(incoming.join("p1.txt"), "Graphene strain raises conductivity.").unwrap();
    fs::write(incoming.join("p1_copy.txt"), "Graphene strain raises conductivity.").unwrap();
    fs::write(incoming.join("d1.csv"), "x,y\n1,2\n2,4\n").unwrap();

    let out = app::ingest(&cfg, &[incoming.join("p1.txt"), incoming.join("p1_copy.txt")], &[incoming.join("d1.csv")])
        .unwrap();

    assert_eq!(out.papers.len(), 2);
    assert!(out.papers[1].is_duplicate());
    assert_eq!(input_count(&cfg, InputKind::Papers), 1);
    assert_eq!(input_count(&cfg, InputKind::Data), 1);

    let summary = app::clear(&cfg).unwrap();
    assert_eq!(summary.files_removed, 2);
    assert_eq!(input_count(&cfg, InputKind::Papers), 0);
}

#[test]
fn deleting_a_paper_and_rerunning_prunes_its_image() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), 1);
    seed_inputs(&cfg);
    app::run_pipeline(&cfg, None, CancellationToken::new()).unwrap();
    let images = cfg.layout.outputs_dir.join("visualizations");
    assert_eq!(fs::read_dir(&images).unwrap().count(), 2);

    app::delete(&cfg, InputKind::Papers, "PaperB.txt").unwrap();
    assert_eq!(input_count(&cfg, InputKind::Papers), 1);
    let out = app::run_pipeline(&cfg, None, CancellationToken::new()).unwrap();

    assert!(out.report.is_clean(), "{}", out.report);
    assert_eq!(fs::read_dir(&images).unwrap().count(), 1);
    assert!(app::delete(&cfg, InputKind::Papers, "PaperB.txt").is_err());
}

#[test]
fn log_file_lives_under_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir.path().join("fresh"), 1);

    app::open_log_file(&cfg.layout).unwrap();

    assert!(cfg.layout.log_file().is_file());
    assert!(cfg.layout.log_file().starts_with(&cfg.layout.outputs_dir));
}
