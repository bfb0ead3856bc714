//! Estado de los artifacts conocidos (qué existe y cuántas entradas tiene).

use asra_core::constants::ALL_ARTIFACTS;
use asra_core::errors::StoreError;
use asra_core::model::ArtifactName;
use asra_core::store::ArtifactStore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArtifactState {
    Missing,
    Present { entries: usize },
    Unreadable { detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactStatus {
    pub name: ArtifactName,
    #[serde(flatten)]
    pub state: ArtifactState,
}

/// Inspecciona los cuatro artifacts del pipeline sin modificarlos.
pub fn artifact_status(store: &dyn ArtifactStore) -> Vec<ArtifactStatus> {
    ALL_ARTIFACTS.iter()
                 .map(|name| {
                     let state = match store.load(name) {
                         Ok(map) => ArtifactState::Present { entries: map.len() },
                         Err(StoreError::NotFound(_)) => ArtifactState::Missing,
                         Err(e) => ArtifactState::Unreadable { detail: e.to_string() },
                     };
                     ArtifactStatus { name: name.clone(), state }
                 })
                 .collect()
}
