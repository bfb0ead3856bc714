//! Modelos neutrales (ArtifactName, ArtifactMap, WorkItem, PayloadSpec).

pub mod artifact;
pub mod item;
pub mod payload;

pub use artifact::{artifact_fingerprint, ArtifactMap, ArtifactName};
pub use item::WorkItem;
pub use payload::{is_empty_payload, PayloadSpec};
