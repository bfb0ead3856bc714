use std::fs;

use asra_providers::{DirectoryLoader, FrequencySummarizer, HypothesisGenerator, ItemLoader, Summarizer,
                     TemplateHypothesisGenerator};

#[test]
fn papers_flow_through_local_collaborators() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("PaperA.txt"),
              "Lattice strain raises graphene conductivity. Strain also shifts phonon modes in graphene.")
        .unwrap();

    let docs = DirectoryLoader::papers().load_items(dir.path()).unwrap();
    assert_eq!(docs.len(), 1);

    let ranked = FrequencySummarizer::new("local", 5).embed_and_rank(&docs[0].content).unwrap();
    assert_eq!(ranked.key_points.len(), ranked.scores.len());

    let context = ranked.key_points.join(" ");
    let hypothesis = TemplateHypothesisGenerator::new("template").generate_hypothesis(&context).unwrap();
    assert!(hypothesis.is_object());
    assert!(hypothesis["hypothesis"].as_str().unwrap().contains("strain")
            || hypothesis["hypothesis"].as_str().unwrap().contains("graphene"));
}
