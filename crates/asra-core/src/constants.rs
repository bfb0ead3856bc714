//! Nombres fijos de los artifacts del pipeline de investigación.

use crate::model::ArtifactName;

pub const LITERATURE_ANALYSIS: ArtifactName = ArtifactName::from_static("literature_analysis.json");
pub const GENERATED_HYPOTHESES: ArtifactName = ArtifactName::from_static("generated_hypotheses.json");
pub const EXPERIMENTAL_ANALYSIS: ArtifactName = ArtifactName::from_static("experimental_analysis.json");
pub const VISUALIZATION_METADATA: ArtifactName = ArtifactName::from_static("visualization_metadata.json");

/// Artifacts en orden de producción.
pub const ALL_ARTIFACTS: [ArtifactName; 4] =
    [LITERATURE_ANALYSIS, GENERATED_HYPOTHESES, EXPERIMENTAL_ANALYSIS, VISUALIZATION_METADATA];

/// Subdirectorio (relativo a outputs) para las imágenes generadas.
pub const VISUALIZATION_DIR: &str = "visualizations";
